//! Initialize a loglint configuration
//!
//! Writes a commented starter `loglint.toml` in the current directory.

use crate::config::loglint_toml::CONFIG_FILE;
use std::fs;
use std::path::Path;

/// Default content for loglint.toml
pub const DEFAULT_CONFIG: &str = r#"[loglint]
version = "1"

# File patterns to include, relative to each checked path
include = ["**/*.go"]

# File patterns to exclude
exclude = ["vendor/**", "**/testdata/**"]

# Logging APIs to recognise. Without any [[apis]] entries, log/slog and
# go.uber.org/zap are recognised.
#
# [[apis]]
# package = "go.uber.org/zap"
# type = "Logger"
# package_level = false
# methods = ["Debug", "Info", "Warn", "Error"]
# constructors = ["NewProduction", "NewDevelopment"]
# message_args = { }

[rules]
# All built-in rules are enabled by default.
# Disable a rule:      english_only = false
# Replace the words:   sensitive_words = { words = ["password", "token"] }
# Ban patterns:        custom_patterns = { patterns = ["(?i)todo"] }

[output]
format = "human"
color = "auto"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What `init` did with the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
    /// File existed and `force` was not given
    Skipped,
}

/// Run the init command in the current directory
///
/// # Errors
///
/// Returns `InitError` if the file cannot be written.
pub fn run_init(force: bool) -> Result<InitOutcome, InitError> {
    init_at(Path::new(CONFIG_FILE), force)
}

/// Write the starter configuration to `path`
///
/// # Errors
///
/// Returns `InitError` if the file cannot be written.
pub fn init_at(path: &Path, force: bool) -> Result<InitOutcome, InitError> {
    let outcome = if !path.exists() {
        InitOutcome::Created
    } else if force {
        InitOutcome::Overwritten
    } else {
        return Ok(InitOutcome::Skipped);
    };

    fs::write(path, DEFAULT_CONFIG)?;
    Ok(outcome)
}

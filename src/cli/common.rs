//! Common helper functions shared across CLI commands
//!
//! Loading configuration, building the registry and analyzer, and discovering
//! files.

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::config::loglint_toml::CONFIG_FILE;
use crate::engine::file_walker::{FileWalker, FileWalkerError, SkipReason, WalkResult};
use crate::error::{ConfigError, LintError};
use crate::rules::RuleRegistry;
use std::path::{Path, PathBuf};

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_DIAGNOSTICS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Load configuration
///
/// An explicit path must exist. Without one, `./loglint.toml` is used when
/// present and the built-in defaults otherwise.
///
/// # Errors
///
/// Returns `ConfigError::Io` if an explicit file is missing or unreadable and
/// `ConfigError::Parse`/`Validation` if the file is invalid.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                )));
            }
            Config::load(path)
        }
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                Config::load(default_path)
            } else {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                Ok(Config::default())
            }
        }
    }
}

/// Registry holding the built-in rules
///
/// # Errors
///
/// Returns `LintError::Rule` if registration fails.
pub(crate) fn build_registry() -> Result<RuleRegistry, LintError> {
    Ok(RuleRegistry::with_builtins()?)
}

/// Analyzer configured from `config`
///
/// # Errors
///
/// Returns `LintError` if registration or rule configuration fails.
pub(crate) fn build_analyzer(config: &Config) -> Result<Analyzer, LintError> {
    let registry = build_registry()?;
    Ok(Analyzer::from_config(&registry, config)?)
}

/// Discover Go files under each path using the configured include/exclude globs
///
/// Skipped paths are logged at debug level when that level is enabled.
///
/// # Errors
///
/// Returns `FileWalkerError` if there is an error walking the file system.
pub(crate) fn discover_files(
    paths: &[PathBuf],
    config: &Config,
) -> Result<Vec<PathBuf>, FileWalkerError> {
    let verbose = tracing::enabled!(tracing::Level::DEBUG);
    let (files, skipped) = discover_files_with_skips(paths, config, verbose)?;
    for (path, reason) in &skipped {
        tracing::debug!(path = %path.display(), reason = ?reason, "skipped");
    }
    Ok(files)
}

/// Files to analyse plus, when `verbose`, every skipped path with its reason
///
/// # Errors
///
/// Returns `FileWalkerError` if there is an error walking the file system.
pub(crate) fn discover_files_with_skips(
    paths: &[PathBuf],
    config: &Config,
    verbose: bool,
) -> Result<(Vec<PathBuf>, Vec<(PathBuf, SkipReason)>), FileWalkerError> {
    let mut all_files = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        let walker = FileWalker::with_verbose(
            path,
            &config.loglint.include,
            &config.loglint.exclude,
            verbose,
        )?;
        for result in walker.walk_with_skip_info() {
            match result? {
                WalkResult::File(file) => all_files.push(file),
                WalkResult::Skipped { path, reason } => skipped.push((path, reason)),
            }
        }
    }

    all_files.sort();
    all_files.dedup();
    Ok((all_files, skipped))
}

/// Exit code for a failed command; only unparseable configuration gets its own code
pub(crate) fn exit_code_for(error: &LintError) -> i32 {
    match error {
        LintError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
        _ => EXIT_ERROR,
    }
}

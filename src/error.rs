//! Error types for loglint
//!
//! Configuration problems, registry misuse, and driver failures each get their
//! own enum; `LintError` composes them for the CLI.

use crate::engine::file_walker::FileWalkerError;
use std::path::PathBuf;

/// Configuration-related errors
///
/// All of these are raised while loading or applying configuration, before any
/// source file is analysed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but is semantically invalid
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// A rule name in the configuration is not registered
    #[error("Unknown rule in configuration: {0}")]
    UnknownRule(String),

    /// A rule option is missing, unknown, or has the wrong type
    #[error("Invalid option for rule {rule}: {message}")]
    InvalidOption { rule: String, message: String },

    /// A custom pattern failed to compile
    #[error("Invalid pattern '{pattern}' for rule {rule}: {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        source: regex::Error,
    },
}

/// Rule registry errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Rule name is empty or contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid rule name: '{0}'")]
    InvalidName(String),

    /// A rule with this name is already registered
    #[error("Rule '{0}' is already registered")]
    Duplicate(String),

    /// Rule not found
    #[error("Rule not found: {0}")]
    NotFound(String),
}

/// Top-level error type for loglint
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// File discovery error
    #[error("File walker error: {0}")]
    FileWalker(#[from] FileWalkerError),

    /// Source file could not be parsed
    #[error("Parse error in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

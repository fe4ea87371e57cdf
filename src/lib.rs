#![forbid(unsafe_code)]

//! Loglint: style and security checks for Go log messages
//!
//! Loglint finds calls into known logging APIs (`log/slog`, `go.uber.org/zap`,
//! or APIs named in `loglint.toml`), resolves the message argument, and runs a
//! set of configurable rules over it. Rules report diagnostics with an optional
//! suggested replacement for the message literal.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod syntax;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, LintError, RuleError};

// Re-export core domain types for convenient access
pub use analysis::{Analyzer, Diagnostic, LoggingApi};
pub use config::Config;
pub use rules::{Rule, RuleRegistry};
pub use types::{GlobPattern, RuleName, Span};

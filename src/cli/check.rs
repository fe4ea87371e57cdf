//! Check command implementation
//!
//! This module implements the `loglint check` command, which:
//! - Loads configuration from loglint.toml (or defaults)
//! - Builds the rule registry and configures the rules
//! - Discovers Go files to check
//! - Analyses them in parallel
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::common::{
    EXIT_DIAGNOSTICS, EXIT_ERROR, EXIT_SUCCESS, build_analyzer, discover_files, exit_code_for,
    load_config,
};
use crate::config::{ColorOption, OutputFormat};
use crate::engine::{ExecutionEngine, ExecutionResult};
use crate::error::LintError;
use crate::output::human::stdout_stream;
use crate::output::{HumanFormatter, JsonlFormatter};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Run the check command
///
/// Exit code:
/// - 0: no diagnostics
/// - 1: one or more diagnostics
/// - 2: error (configuration, I/O, a file that could not be parsed)
/// - 3: configuration file is not valid TOML
pub fn run_check(
    paths: &[PathBuf],
    format: Option<OutputFormat>,
    config_path: Option<&Path>,
    color: Option<ColorOption>,
) -> i32 {
    match run_check_inner(paths, format, config_path, color) {
        Ok(result) => {
            for error in &result.errors {
                eprintln!("Error: {}", error);
            }
            if !result.passed() {
                EXIT_DIAGNOSTICS
            } else if !result.errors.is_empty() {
                EXIT_ERROR
            } else {
                EXIT_SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_check_inner(
    paths: &[PathBuf],
    format: Option<OutputFormat>,
    config_path: Option<&Path>,
    color: Option<ColorOption>,
) -> Result<ExecutionResult, LintError> {
    let config = load_config(config_path)?;
    let format = format.unwrap_or(config.output.format);
    let color = color.unwrap_or(config.output.color);

    let analyzer = build_analyzer(&config)?;
    let files = discover_files(paths, &config)?;

    if files.is_empty() {
        tracing::warn!("no Go files found to check");
    }
    tracing::info!(
        files = files.len(),
        rules = analyzer.rules().count(),
        "checking"
    );

    let engine = ExecutionEngine::new(&analyzer);
    let result = engine.execute(&files);

    match format {
        OutputFormat::Human => {
            let mut stdout = stdout_stream(color);
            HumanFormatter::new().write(&mut stdout, &result)?;
        }
        OutputFormat::Jsonl => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(JsonlFormatter::new().format(&result).as_bytes())?;
        }
    }

    Ok(result)
}

//! List command implementation
//!
//! `loglint list` shows every registered rule, whether the configuration
//! enables it, and its description, in human or JSONL form.

use crate::cli::common::{EXIT_SUCCESS, build_registry, exit_code_for, load_config};
use crate::config::{Config, OutputFormat};
use crate::error::LintError;
use serde::Serialize;
use std::path::Path;

/// One row of `loglint list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListing {
    pub name: String,
    pub enabled: bool,
    pub description: String,
}

/// Run the list command
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: configuration file is not valid TOML
pub fn run_list(format: OutputFormat, config_path: Option<&Path>) -> i32 {
    match run_list_inner(format, config_path) {
        Ok(output) => {
            print!("{}", output);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_list_inner(format: OutputFormat, config_path: Option<&Path>) -> Result<String, LintError> {
    let config = load_config(config_path)?;
    let listings = rule_listings(&config)?;
    Ok(match format {
        OutputFormat::Human => format_human(&listings),
        OutputFormat::Jsonl => format_jsonl(&listings),
    })
}

/// Every registered rule with its configured enabled state
///
/// # Errors
///
/// Returns `LintError` if the configuration names unknown rules or bad options.
pub fn rule_listings(config: &Config) -> Result<Vec<RuleListing>, LintError> {
    let registry = build_registry()?;
    let rules = registry.instantiate(&config.rules)?;
    Ok(rules
        .iter()
        .map(|rule| RuleListing {
            name: rule.name().to_string(),
            enabled: rule.enabled(),
            description: rule.description().to_string(),
        })
        .collect())
}

fn format_human(listings: &[RuleListing]) -> String {
    let width = listings.iter().map(|l| l.name.len()).max().unwrap_or(0);
    let mut output = String::new();
    for listing in listings {
        let marker = if listing.enabled { "✓" } else { "✗" };
        output.push_str(&format!(
            "{} {:<width$}  {}\n",
            marker,
            listing.name,
            listing.description,
            width = width
        ));
    }
    output
}

fn format_jsonl(listings: &[RuleListing]) -> String {
    #[derive(Serialize)]
    struct RuleRecord<'a> {
        #[serde(rename = "type")]
        record_type: &'static str,
        #[serde(flatten)]
        listing: &'a RuleListing,
    }

    let mut output = String::new();
    for listing in listings {
        if let Ok(json) = serde_json::to_string(&RuleRecord {
            record_type: "rule",
            listing,
        }) {
            output.push_str(&json);
            output.push('\n');
        }
    }
    output
}

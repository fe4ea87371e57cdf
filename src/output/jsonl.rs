#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. All diagnostic records (sorted by file, then position, then rule order)
//! 2. One status record

use crate::engine::{ExecutionResult, FileDiagnostic};
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the execution result as JSONL
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut output = String::new();

        let mut diagnostics: Vec<&FileDiagnostic> = result.diagnostics.iter().collect();
        // Stable sort keeps rule order for diagnostics on the same expression
        diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.diagnostic.span.start.cmp(&b.diagnostic.span.start))
        });

        for diagnostic in diagnostics {
            push_record(
                &mut output,
                &DiagnosticRecord {
                    record_type: "diagnostic",
                    diagnostic,
                },
            );
        }

        push_record(
            &mut output,
            &StatusRecord {
                record_type: "status",
                passed: result.passed() && result.errors.is_empty(),
                files_checked: result.files_checked as u64,
                total_diagnostics: result.diagnostics.len() as u64,
                errors: result.errors.len() as u64,
            },
        );

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record(output: &mut String, record: &impl Serialize) {
    match serde_json::to_string(record) {
        Ok(json) => {
            output.push_str(&json);
            output.push('\n');
        }
        Err(e) => tracing::warn!(error = %e, "failed to serialize output record"),
    }
}

/// Diagnostic record for JSONL output
#[derive(Debug, Serialize)]
struct DiagnosticRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    diagnostic: &'a FileDiagnostic,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: u64,
    total_diagnostics: u64,
    errors: u64,
}

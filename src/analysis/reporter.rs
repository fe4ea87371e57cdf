#![forbid(unsafe_code)]

//! Diagnostic reporting: positions findings and turns fixes into source edits

use crate::analysis::executor::Finding;
use crate::syntax::{Expr, QuoteStyle};
use crate::types::Span;
use serde::Serialize;
use std::fmt::Write as _;

/// A replacement for the bytes covered by `span`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedEdit {
    pub description: String,
    pub span: Span,
    pub new_text: String,
}

/// One rule failure at one message expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: String,
    pub span: Span,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<SuggestedEdit>,
}

/// Maps findings for one file onto diagnostics
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticReporter {
    source_len: usize,
}

impl DiagnosticReporter {
    /// Reporter for a source of `source_len` bytes
    pub fn new(source_len: usize) -> Self {
        DiagnosticReporter { source_len }
    }

    /// Diagnostic for `finding` at `expr`, or `None` if `expr` lies outside the source
    pub fn report(&self, expr: &Expr, finding: Finding<'_>) -> Option<Diagnostic> {
        let span = expr.span();
        if !span.fits_within(self.source_len) {
            tracing::warn!(
                rule = finding.rule,
                start = span.start,
                end = span.end,
                source_len = self.source_len,
                "dropping diagnostic outside source range"
            );
            return None;
        }

        let fix = finding.failure.fix.map(|fix| SuggestedEdit {
            description: fix.description,
            span,
            new_text: quote_replacement(expr, &fix.new_text),
        });

        Some(Diagnostic {
            rule: finding.rule.to_string(),
            span,
            message: finding.failure.message,
            fix,
        })
    }
}

/// Source text replacing `expr` with the message `text`
///
/// A literal keeps its own quoting style; anything else gets the bare text.
pub fn quote_replacement(expr: &Expr, text: &str) -> String {
    match expr {
        Expr::StringLit(lit) => match lit.quote {
            QuoteStyle::Raw if can_be_raw(text) => format!("`{}`", text),
            _ => quote_interpreted(text),
        },
        _ => text.to_string(),
    }
}

/// Raw literals cannot hold a backtick, and drop carriage returns
fn can_be_raw(text: &str) -> bool {
    !text.contains('`') && !text.contains('\r')
}

/// `text` as a double-quoted Go literal
pub fn quote_interpreted(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\u{07}' => quoted.push_str("\\a"),
            '\u{08}' => quoted.push_str("\\b"),
            '\u{0C}' => quoted.push_str("\\f"),
            '\u{0B}' => quoted.push_str("\\v"),
            c if c.is_control() => {
                let code = c as u32;
                let _ = if code < 0x80 {
                    write!(quoted, "\\x{:02x}", code)
                } else if code <= 0xFFFF {
                    write!(quoted, "\\u{:04x}", code)
                } else {
                    write!(quoted, "\\U{:08x}", code)
                };
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

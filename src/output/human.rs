#![forbid(unsafe_code)]

//! Human-readable output formatter
//!
//! One line per diagnostic, `path:line:col: rule: message`, followed by an
//! indented `fix:` line when the diagnostic carries a suggested edit, then a
//! one-line summary.

use crate::config::ColorOption;
use crate::engine::ExecutionResult;
use std::io::{self, IsTerminal};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Human output formatter
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write all diagnostics and a summary line to `out`
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write(&self, out: &mut dyn WriteColor, result: &ExecutionResult) -> io::Result<()> {
        for diagnostic in &result.diagnostics {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(
                out,
                "{}:{}:{}",
                diagnostic.file.display(),
                diagnostic.line,
                diagnostic.column
            )?;
            out.reset()?;
            write!(out, ": ")?;

            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            write!(out, "{}", diagnostic.diagnostic.rule)?;
            out.reset()?;
            writeln!(out, ": {}", diagnostic.diagnostic.message)?;

            if let Some(fix) = &diagnostic.diagnostic.fix {
                write!(out, "    ")?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "fix")?;
                out.reset()?;
                writeln!(out, ": {} -> {}", fix.description, fix.new_text)?;
            }
        }

        if !result.diagnostics.is_empty() {
            writeln!(out)?;
        }

        let problems = result.diagnostics.len();
        let (color, text) = if problems == 0 {
            (Color::Green, "No problems found".to_string())
        } else {
            (
                Color::Red,
                format!("Found {} problem{}", problems, if problems == 1 { "" } else { "s" }),
            )
        };
        out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(out, "{}", text)?;
        out.reset()?;
        writeln!(
            out,
            " in {} file{}",
            result.files_checked,
            if result.files_checked == 1 { "" } else { "s" }
        )?;

        Ok(())
    }

    /// Format into a plain string without color
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut buffer = termcolor::Buffer::no_color();
        // Writing to an in-memory buffer cannot fail
        let _ = self.write(&mut buffer, result);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout stream honouring the color setting; `auto` means color on a terminal
pub fn stdout_stream(color: ColorOption) -> StandardStream {
    let choice = match color {
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
        ColorOption::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
        ColorOption::Auto => ColorChoice::Never,
    };
    StandardStream::stdout(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Diagnostic, SuggestedEdit};
    use crate::engine::FileDiagnostic;
    use crate::types::Span;
    use std::path::PathBuf;

    fn diagnostic(rule: &str, message: &str, fix: Option<&str>) -> FileDiagnostic {
        let span = Span::new(10, 27);
        FileDiagnostic {
            file: PathBuf::from("cmd/main.go"),
            line: 6,
            column: 12,
            end_line: 6,
            end_column: 29,
            diagnostic: Diagnostic {
                rule: rule.to_string(),
                span,
                message: message.to_string(),
                fix: fix.map(|text| SuggestedEdit {
                    description: "Change first letter to lowercase".to_string(),
                    span,
                    new_text: text.to_string(),
                }),
            },
        }
    }

    #[test]
    fn test_format_with_diagnostics() {
        let result = ExecutionResult {
            diagnostics: vec![
                diagnostic(
                    "lowercase",
                    "log message should start with a lowercase letter",
                    Some("\"starting server\""),
                ),
                diagnostic("english_only", "log message should be in English only", None),
            ],
            files_checked: 3,
            errors: Vec::new(),
        };

        let output = HumanFormatter::new().format(&result);
        let expected = "\
cmd/main.go:6:12: lowercase: log message should start with a lowercase letter
    fix: Change first letter to lowercase -> \"starting server\"
cmd/main.go:6:12: english_only: log message should be in English only

Found 2 problems in 3 files
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_clean() {
        let result = ExecutionResult {
            diagnostics: Vec::new(),
            files_checked: 1,
            errors: Vec::new(),
        };
        assert_eq!(
            HumanFormatter::new().format(&result),
            "No problems found in 1 file\n"
        );
    }

    #[test]
    fn test_color_output_contains_escapes() {
        let result = ExecutionResult {
            diagnostics: vec![diagnostic("lowercase", "bad", None)],
            files_checked: 1,
            errors: Vec::new(),
        };
        let mut buffer = termcolor::Buffer::ansi();
        HumanFormatter::new().write(&mut buffer, &result).unwrap();
        let output = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(output.contains("\x1b["));
        // the summary count is coloured, the file count is not
        assert!(output.contains("Found 1 problem\x1b[0m in 1 file\n"));
        assert!(!output.contains("Found 1 problem in 1 file"));
    }
}

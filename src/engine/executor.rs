#![forbid(unsafe_code)]

//! Parallel execution engine for analysing files
//!
//! This module provides the ExecutionEngine, which reads and analyses
//! discovered Go files in parallel using rayon. The analyzer's rules are
//! shared immutably across worker threads.

use crate::analysis::{Analyzer, Diagnostic};
use crate::error::LintError;
use crate::syntax::GoSource;
use crate::types::LineIndex;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A diagnostic located in a file, with 1-indexed line/column for both ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiagnostic {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

impl FileDiagnostic {
    pub fn new(file: &Path, lines: &LineIndex, diagnostic: Diagnostic) -> Self {
        let (line, column) = lines.line_col(diagnostic.span.start);
        let (end_line, end_column) = lines.line_col(diagnostic.span.end);
        FileDiagnostic {
            file: file.to_path_buf(),
            line,
            column,
            end_line,
            end_column,
            diagnostic,
        }
    }
}

/// Result of analysing a set of files
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// Diagnostics in file order, then source order within each file
    pub diagnostics: Vec<FileDiagnostic>,
    /// Files read and parsed successfully
    pub files_checked: usize,
    /// Files that could not be read or parsed
    pub errors: Vec<LintError>,
}

impl ExecutionResult {
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Execution engine that coordinates parallel analysis
pub struct ExecutionEngine<'a> {
    analyzer: &'a Analyzer,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(analyzer: &'a Analyzer) -> Self {
        Self { analyzer }
    }

    /// Analyse every file in parallel
    ///
    /// Unreadable files are logged and skipped. Files the parser rejects are
    /// reported in `errors`; the rest of the run continues.
    pub fn execute(&self, files: &[PathBuf]) -> ExecutionResult {
        let outcomes: Vec<Option<Result<Vec<FileDiagnostic>, LintError>>> = files
            .par_iter()
            .map(|path| self.execute_file(path))
            .collect();

        let mut result = ExecutionResult::default();
        for outcome in outcomes.into_iter().flatten() {
            match outcome {
                Ok(diagnostics) => {
                    result.files_checked += 1;
                    result.diagnostics.extend(diagnostics);
                }
                Err(e) => result.errors.push(e),
            }
        }
        result
    }

    /// `None` when the file could not be read
    fn execute_file(&self, path: &Path) -> Option<Result<Vec<FileDiagnostic>, LintError>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
                return None;
            }
        };

        Some(self.analyze_content(path, content))
    }

    /// Analyse already-loaded source text as if read from `path`
    ///
    /// # Errors
    ///
    /// Returns `LintError::Parse` if the source cannot be parsed at all.
    pub fn analyze_content(
        &self,
        path: &Path,
        content: String,
    ) -> Result<Vec<FileDiagnostic>, LintError> {
        let lines = LineIndex::new(&content);
        let source = GoSource::parse(content).map_err(|e| LintError::Parse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if source.has_syntax_errors() {
            tracing::debug!(file = %path.display(), "syntax errors, analysing recovered tree");
        }

        Ok(self
            .analyzer
            .analyze_go(&source)
            .into_iter()
            .map(|diagnostic| FileDiagnostic::new(path, &lines, diagnostic))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rules::RuleRegistry;
    use tempfile::TempDir;

    fn analyzer() -> Analyzer {
        let registry = RuleRegistry::with_builtins().unwrap();
        Analyzer::from_config(&registry, &Config::default()).unwrap()
    }

    const SOURCE: &str = "package main\n\nimport \"log/slog\"\n\nfunc main() {\n\tslog.Info(\"Starting server\")\n\tslog.Info(\"ready\")\n\tslog.Error(\"Failed!!\")\n}\n";

    #[test]
    fn test_line_and_column() {
        let analyzer = analyzer();
        let engine = ExecutionEngine::new(&analyzer);
        let diagnostics = engine
            .analyze_content(Path::new("main.go"), SOURCE.to_string())
            .unwrap();

        assert_eq!(diagnostics.len(), 3);
        let first = &diagnostics[0];
        assert_eq!(first.file, PathBuf::from("main.go"));
        assert_eq!((first.line, first.column), (6, 12));
        assert_eq!((first.end_line, first.end_column), (6, 29));
        assert_eq!(first.diagnostic.rule, "lowercase");

        assert_eq!(diagnostics[1].line, 8);
        assert_eq!(diagnostics[2].line, 8);
    }

    #[test]
    fn test_execute_across_files() {
        let dir = TempDir::new().unwrap();
        let dirty = dir.path().join("dirty.go");
        let clean = dir.path().join("clean.go");
        fs::write(&dirty, SOURCE).unwrap();
        fs::write(
            &clean,
            "package main\n\nimport \"log/slog\"\n\nfunc f() {\n\tslog.Info(\"all good\")\n}\n",
        )
        .unwrap();
        let missing = dir.path().join("missing.go");

        let analyzer = analyzer();
        let engine = ExecutionEngine::new(&analyzer);
        let result = engine.execute(&[clean.clone(), dirty.clone(), missing]);

        assert_eq!(result.files_checked, 2);
        assert!(result.errors.is_empty());
        assert!(!result.passed());
        assert_eq!(result.diagnostics.len(), 3);
        assert!(result.diagnostics.iter().all(|d| d.file == dirty));
    }

    #[test]
    fn test_serialized_diagnostic_is_flat() {
        let analyzer = analyzer();
        let engine = ExecutionEngine::new(&analyzer);
        let diagnostics = engine
            .analyze_content(Path::new("main.go"), SOURCE.to_string())
            .unwrap();

        let json = serde_json::to_value(&diagnostics[0]).unwrap();
        assert_eq!(json["file"], "main.go");
        assert_eq!(json["rule"], "lowercase");
        assert_eq!(json["line"], 6);
        assert_eq!(json["fix"]["new_text"], "\"starting server\"");
    }
}

#![forbid(unsafe_code)]

//! Analysis entry point: call sites in, diagnostics out

use crate::analysis::api::LoggingApi;
use crate::analysis::executor::RuleExecutor;
use crate::analysis::extractor::CallSiteExtractor;
use crate::analysis::reporter::{Diagnostic, DiagnosticReporter};
use crate::analysis::resolver::check_context;
use crate::config::Config;
use crate::error::ConfigError;
use crate::rules::{Rule, RuleRegistry};
use crate::syntax::{CallExpr, GoSource, SourceError, SymbolResolver};

/// Configured APIs and rules, built once per run and shared across files
pub struct Analyzer {
    apis: Vec<LoggingApi>,
    executor: RuleExecutor,
}

impl Analyzer {
    pub fn new(apis: Vec<LoggingApi>, rules: Vec<Box<dyn Rule>>) -> Self {
        Analyzer {
            apis,
            executor: RuleExecutor::new(rules),
        }
    }

    /// Instantiate and configure the registry's rules according to `config`
    ///
    /// Disabled rules are left out entirely.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown rules or options the rules reject.
    pub fn from_config(registry: &RuleRegistry, config: &Config) -> Result<Self, ConfigError> {
        let rules = registry.configured_rules(&config.rules)?;
        let apis = LoggingApi::from_configs(&config.apis);
        tracing::debug!(rules = rules.len(), apis = apis.len(), "analyzer ready");
        Ok(Self::new(apis, rules))
    }

    pub fn apis(&self) -> &[LoggingApi] {
        &self.apis
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.executor.rules()
    }

    /// Analyse a stream of calls from a source of `source_len` bytes
    pub fn analyze_calls<I>(
        &self,
        calls: I,
        symbols: &dyn SymbolResolver,
        source_len: usize,
    ) -> Vec<Diagnostic>
    where
        I: IntoIterator<Item = CallExpr>,
    {
        let extractor = CallSiteExtractor::new(&self.apis, symbols);
        let reporter = DiagnosticReporter::new(source_len);
        let mut diagnostics = Vec::new();

        for site in extractor.extract(calls) {
            let message = site.message();
            let ctx = check_context(message);
            for finding in self.executor.run(&ctx) {
                if let Some(diagnostic) = reporter.report(message, finding) {
                    diagnostics.push(diagnostic);
                }
            }
        }

        diagnostics
    }

    pub fn analyze_go(&self, source: &GoSource) -> Vec<Diagnostic> {
        self.analyze_calls(source.calls(), source.symbols(), source.source().len())
    }

    /// Parse and analyse Go source text
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the text cannot be parsed at all.
    pub fn analyze_source(&self, text: impl Into<String>) -> Result<Vec<Diagnostic>, SourceError> {
        let source = GoSource::parse(text)?;
        Ok(self.analyze_go(&source))
    }
}

#![forbid(unsafe_code)]

//! Call-site extraction, message resolution, rule execution and reporting

pub mod analyzer;
pub mod api;
pub mod executor;
pub mod extractor;
pub mod reporter;
pub mod resolver;

pub use analyzer::Analyzer;
pub use api::LoggingApi;
pub use executor::{Finding, RuleExecutor};
pub use extractor::{CallSite, CallSiteExtractor};
pub use reporter::{Diagnostic, DiagnosticReporter, SuggestedEdit};
pub use resolver::{check_context, resolve_message};

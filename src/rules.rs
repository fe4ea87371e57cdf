#![forbid(unsafe_code)]

//! Rule definitions and registry

pub mod builtin;
pub mod custom_patterns;
pub mod english_only;
pub mod lowercase;
pub mod registry;
mod rule;
pub mod sensitive_words;
pub mod special_chars;

pub use custom_patterns::CustomPatternsRule;
pub use english_only::EnglishOnlyRule;
pub use lowercase::LowercaseRule;
pub use registry::{RuleBuilder, RuleRegistry};
pub use rule::{CheckContext, Rule, RuleFailure, RuleMeta, RuleResult, SuggestedFix};
pub use sensitive_words::SensitiveWordsRule;
pub use special_chars::NoSpecialCharsRule;

#![forbid(unsafe_code)]

//! Built-in rules compiled into the binary

use crate::rules::{
    CustomPatternsRule, EnglishOnlyRule, LowercaseRule, NoSpecialCharsRule, Rule,
    SensitiveWordsRule, custom_patterns, english_only, lowercase, sensitive_words, special_chars,
};

/// Constructor for a built-in rule
pub type BuiltinConstructor = fn() -> Box<dyn Rule>;

/// Every built-in rule, in registration order
pub const BUILTIN_RULES: &[(&str, BuiltinConstructor)] = &[
    (lowercase::NAME, LowercaseRule::boxed),
    (special_chars::NAME, NoSpecialCharsRule::boxed),
    (english_only::NAME, EnglishOnlyRule::boxed),
    (sensitive_words::NAME, SensitiveWordsRule::boxed),
    (custom_patterns::NAME, CustomPatternsRule::boxed),
];

/// Names of all built-in rules, in registration order
pub fn builtin_rule_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_RULES.iter().map(|(name, _)| *name)
}

#![forbid(unsafe_code)]

//! `custom_patterns`: user-supplied regexes that messages must not match

use crate::config::{RuleOptions, parse_options};
use crate::error::ConfigError;
use crate::rules::{CheckContext, Rule, RuleMeta, RuleResult};
use regex::Regex;
use serde::Deserialize;

pub const NAME: &str = "custom_patterns";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CustomPatternsOptions {
    #[serde(default)]
    patterns: Vec<String>,
}

pub struct CustomPatternsRule {
    meta: RuleMeta,
    patterns: Vec<Regex>,
}

impl CustomPatternsRule {
    pub fn new() -> Self {
        CustomPatternsRule {
            meta: RuleMeta::new(NAME, "Checks log messages against custom patterns"),
            patterns: Vec::new(),
        }
    }

    pub fn boxed() -> Box<dyn Rule> {
        Box::new(Self::new())
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }
}

impl Default for CustomPatternsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for CustomPatternsRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RuleMeta {
        &mut self.meta
    }

    /// Compile every configured pattern; one bad pattern rejects the whole set
    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        let options: CustomPatternsOptions = parse_options(NAME, options)?;

        let patterns = options
            .patterns
            .into_iter()
            .map(|pattern| {
                Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern {
                    rule: NAME.to_string(),
                    pattern,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.patterns = patterns;
        Ok(())
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> RuleResult {
        match self.patterns.iter().find(|re| re.is_match(ctx.message())) {
            Some(re) => RuleResult::fail(format!("log message matches pattern: {}", re.as_str())),
            None => RuleResult::pass(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Expr;

    fn configured(patterns: &[&str]) -> Result<CustomPatternsRule, ConfigError> {
        let mut rule = CustomPatternsRule::new();
        let mut options = RuleOptions::new();
        options.insert(
            "patterns".to_string(),
            toml::Value::Array(
                patterns
                    .iter()
                    .map(|p| toml::Value::String(p.to_string()))
                    .collect(),
            ),
        );
        rule.configure(&options)?;
        Ok(rule)
    }

    fn check(rule: &CustomPatternsRule, message: &str) -> RuleResult {
        let expr = Expr::string(message);
        rule.check(&CheckContext::new(&expr, message))
    }

    #[test]
    fn test_no_patterns_always_pass() {
        let rule = CustomPatternsRule::new();
        for message in ["", "secret", "anything at all"] {
            assert!(check(&rule, message).is_pass());
        }
    }

    #[test]
    fn test_substring_match_fails() {
        let rule = configured(&["secret"]).unwrap();
        for message in ["secret", "top secret value", "secretive"] {
            let result = check(&rule, message);
            assert_eq!(
                result.failure().map(|f| f.message.as_str()),
                Some("log message matches pattern: secret")
            );
        }
        assert!(check(&rule, "nothing to hide").is_pass());
        assert!(check(&rule, "SECRET").is_pass());
    }

    #[test]
    fn test_first_matching_pattern_is_named() {
        let rule = configured(&["(?i)todo", r"\d{3}-\d{2}-\d{4}"]).unwrap();
        assert_eq!(
            check(&rule, "ssn 123-45-6789").failure().unwrap().message,
            r"log message matches pattern: \d{3}-\d{2}-\d{4}"
        );
        assert_eq!(
            check(&rule, "TODO remove 123-45-6789")
                .failure()
                .unwrap()
                .message,
            "log message matches pattern: (?i)todo"
        );
        assert_eq!(rule.patterns().count(), 2);
    }

    #[test]
    fn test_invalid_pattern_is_a_config_error() {
        let err = configured(&["ok", "(unclosed"]).err().unwrap();
        match err {
            ConfigError::InvalidPattern { rule, pattern, .. } => {
                assert_eq!(rule, NAME);
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_pattern_rejected() {
        let mut rule = CustomPatternsRule::new();
        let mut options = RuleOptions::new();
        options.insert(
            "patterns".to_string(),
            toml::Value::Array(vec![toml::Value::Integer(3)]),
        );
        assert!(matches!(
            rule.configure(&options),
            Err(ConfigError::InvalidOption { .. })
        ));
    }
}

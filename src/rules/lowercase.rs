#![forbid(unsafe_code)]

//! `lowercase`: log messages start with a lowercase letter

use crate::rules::{CheckContext, Rule, RuleMeta, RuleResult};

pub const NAME: &str = "lowercase";

pub struct LowercaseRule {
    meta: RuleMeta,
}

impl LowercaseRule {
    pub fn new() -> Self {
        LowercaseRule {
            meta: RuleMeta::new(
                NAME,
                "Checks that log messages start with a lowercase letter",
            ),
        }
    }

    pub fn boxed() -> Box<dyn Rule> {
        Box::new(Self::new())
    }
}

impl Default for LowercaseRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the corrected message when the first character is an uppercase letter
///
/// Only the first character is inspected. Empty messages and messages that do
/// not start with a letter have no case to fix and yield `None`.
pub fn lowercase_fix(message: &str) -> Option<String> {
    let mut chars = message.chars();
    let first = chars.next()?;
    if !(first.is_alphabetic() && first.is_uppercase()) {
        return None;
    }

    let mut fixed: String = first.to_lowercase().collect();
    fixed.push_str(chars.as_str());
    Some(fixed)
}

impl Rule for LowercaseRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RuleMeta {
        &mut self.meta
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> RuleResult {
        match lowercase_fix(ctx.message()) {
            Some(fixed) => RuleResult::fail_with_fix(
                "log message should start with a lowercase letter",
                "Change first letter to lowercase",
                fixed,
            ),
            None => RuleResult::pass(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Expr;

    fn check(message: &str) -> RuleResult {
        let expr = Expr::string(message);
        LowercaseRule::new().check(&CheckContext::new(&expr, message))
    }

    #[test]
    fn test_lowercase_fix() {
        let cases = [
            ("starting server", None),
            ("Starting server", Some("starting server")),
            ("Database connection failed", Some("database connection failed")),
            ("Ábaco listo", Some("ábaco listo")),
            ("Запуск", Some("запуск")),
            ("", None),
            ("123 items processed", None),
            ("(Starting) server", None),
            ("\"Starting\" server", None),
            (" Server starting", None),
        ];

        for (message, expected) in cases {
            assert_eq!(
                lowercase_fix(message).as_deref(),
                expected,
                "lowercase_fix({:?})",
                message
            );
        }
    }

    #[test]
    fn test_only_first_character_changes() {
        assert_eq!(lowercase_fix("HTTP server").as_deref(), Some("hTTP server"));
    }

    #[test]
    fn test_uppercase_first_fails_with_fix() {
        let result = check("Starting server");
        let failure = result.failure().unwrap();
        assert_eq!(
            failure.message,
            "log message should start with a lowercase letter"
        );
        assert_eq!(failure.fix.as_ref().unwrap().new_text, "starting server");
    }

    #[test]
    fn test_non_letter_start_passes() {
        assert!(check("42 requests").is_pass());
        assert!(check("").is_pass());
        assert!(check("[worker] Started").is_pass());
    }

    #[test]
    fn test_disabled_rule_passes() {
        let mut rule = LowercaseRule::new();
        rule.set_enabled(false);
        let expr = Expr::string("Starting");
        assert!(rule.check(&CheckContext::new(&expr, "Starting")).is_pass());
    }
}

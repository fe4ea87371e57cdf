#![forbid(unsafe_code)]

//! Core Rule trait and related types for checking log messages

use crate::config::RuleOptions;
use crate::error::ConfigError;
use crate::syntax::Expr;

/// Everything a rule may look at for one call site
///
/// Content rules read the resolved `message`; structural rules walk `expr`.
/// Built once per call site and shared read-only by every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckContext<'a> {
    expr: &'a Expr,
    message: String,
}

impl<'a> CheckContext<'a> {
    pub fn new(expr: &'a Expr, message: impl Into<String>) -> Self {
        CheckContext {
            expr,
            message: message.into(),
        }
    }

    /// The message argument exactly as written
    pub fn expr(&self) -> &'a Expr {
        self.expr
    }

    /// Best-effort literal text of the message; empty when nothing resolved
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A proposed replacement for the whole message expression
///
/// `new_text` is the bare message text; quoting is the reporter's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedFix {
    pub description: String,
    pub new_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub message: String,
    pub fix: Option<SuggestedFix>,
}

/// Outcome of checking one rule against one call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResult {
    Pass,
    Fail(RuleFailure),
}

impl RuleResult {
    pub fn pass() -> Self {
        RuleResult::Pass
    }

    pub fn fail(message: impl Into<String>) -> Self {
        RuleResult::Fail(RuleFailure {
            message: message.into(),
            fix: None,
        })
    }

    pub fn fail_with_fix(
        message: impl Into<String>,
        description: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        RuleResult::Fail(RuleFailure {
            message: message.into(),
            fix: Some(SuggestedFix {
                description: description.into(),
                new_text: new_text.into(),
            }),
        })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, RuleResult::Pass)
    }

    pub fn failure(&self) -> Option<&RuleFailure> {
        match self {
            RuleResult::Pass => None,
            RuleResult::Fail(failure) => Some(failure),
        }
    }

    pub fn into_failure(self) -> Option<RuleFailure> {
        match self {
            RuleResult::Pass => None,
            RuleResult::Fail(failure) => Some(failure),
        }
    }
}

/// Identity and enable state shared by every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    name: String,
    description: String,
    enabled: bool,
}

impl RuleMeta {
    /// New metadata; rules start enabled
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        RuleMeta {
            name: name.into(),
            description: description.into(),
            enabled: true,
        }
    }
}

/// Trait that all rules must implement
///
/// A rule is configured once per run and then checked against every call site.
/// `check` takes `&self`, so rules hold configuration only, never per-call
/// state, and the trait is `Send + Sync` so one instance can serve files
/// analysed in parallel.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    fn meta_mut(&mut self) -> &mut RuleMeta;

    /// Evaluate the rule's predicate, ignoring the enabled flag
    ///
    /// Must be total: every input yields a definite pass or fail.
    fn evaluate(&self, ctx: &CheckContext<'_>) -> RuleResult;

    /// Apply rule-specific options from the configuration
    ///
    /// The default accepts no options at all.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an option is unknown or invalid.
    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        if options.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = options.keys().map(String::as_str).collect();
        Err(ConfigError::InvalidOption {
            rule: self.name().to_string(),
            message: format!("rule takes no options, got: {}", names.join(", ")),
        })
    }

    /// Unique rule name used in configuration and diagnostics
    fn name(&self) -> &str {
        &self.meta().name
    }

    fn description(&self) -> &str {
        &self.meta().description
    }

    fn enabled(&self) -> bool {
        self.meta().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.meta_mut().enabled = enabled;
    }

    /// Check a call site; disabled rules pass without evaluating
    fn check(&self, ctx: &CheckContext<'_>) -> RuleResult {
        if !self.enabled() {
            return RuleResult::Pass;
        }
        self.evaluate(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRule {
        meta: RuleMeta,
        evaluations: AtomicUsize,
    }

    impl Rule for CountingRule {
        fn meta(&self) -> &RuleMeta {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut RuleMeta {
            &mut self.meta
        }

        fn evaluate(&self, ctx: &CheckContext<'_>) -> RuleResult {
            self.evaluations.fetch_add(1, Ordering::SeqCst);
            if ctx.message().is_empty() {
                RuleResult::fail("empty message")
            } else {
                RuleResult::pass()
            }
        }
    }

    fn counting_rule() -> CountingRule {
        CountingRule {
            meta: RuleMeta::new("counting", "Counts evaluations"),
            evaluations: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_meta_defaults() {
        let rule = counting_rule();
        assert_eq!(rule.name(), "counting");
        assert_eq!(rule.description(), "Counts evaluations");
        assert!(rule.enabled());
    }

    #[test]
    fn test_disabled_rule_passes_without_evaluating() {
        let mut rule = counting_rule();
        rule.set_enabled(false);

        let expr = Expr::ident("msg");
        let ctx = CheckContext::new(&expr, "");
        assert!(rule.check(&ctx).is_pass());
        assert_eq!(rule.evaluations.load(Ordering::SeqCst), 0);

        rule.set_enabled(true);
        assert!(!rule.check(&ctx).is_pass());
        assert_eq!(rule.evaluations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_configure_rejects_options() {
        let mut rule = counting_rule();
        assert!(rule.configure(&RuleOptions::new()).is_ok());

        let mut options = RuleOptions::new();
        options.insert("words".to_string(), toml::Value::Boolean(true));
        let err = rule.configure(&options).unwrap_err();
        assert!(err.to_string().contains("rule takes no options, got: words"));
    }

    #[test]
    fn test_result_helpers() {
        assert!(RuleResult::pass().is_pass());
        assert!(RuleResult::pass().failure().is_none());

        let fail = RuleResult::fail("bad");
        assert_eq!(fail.failure().unwrap().message, "bad");
        assert!(fail.failure().unwrap().fix.is_none());

        let fixed = RuleResult::fail_with_fix("bad", "Make it good", "good");
        let failure = fixed.into_failure().unwrap();
        assert_eq!(
            failure.fix,
            Some(SuggestedFix {
                description: "Make it good".to_string(),
                new_text: "good".to_string(),
            })
        );
    }

    #[test]
    fn test_check_context_accessors() {
        let expr = Expr::string("hello");
        let ctx = CheckContext::new(&expr, "hello");
        assert_eq!(ctx.expr(), &expr);
        assert_eq!(ctx.message(), "hello");
    }

    #[test]
    fn test_rule_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Box<dyn Rule>>();
        assert_sync::<Box<dyn Rule>>();
    }
}

#![forbid(unsafe_code)]

//! Runs every configured rule against one call site

use crate::rules::{CheckContext, Rule, RuleFailure};

/// A failing rule result, tagged with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding<'r> {
    pub rule: &'r str,
    pub failure: RuleFailure,
}

/// An ordered set of configured rules
///
/// Rules are shared read-only; one executor can serve many threads.
pub struct RuleExecutor {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleExecutor {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        RuleExecutor { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check every rule, in order, and collect every failure
    pub fn run(&self, ctx: &CheckContext<'_>) -> Vec<Finding<'_>> {
        self.rules
            .iter()
            .filter_map(|rule| {
                rule.check(ctx).into_failure().map(|failure| Finding {
                    rule: rule.name(),
                    failure,
                })
            })
            .collect()
    }
}

#![forbid(unsafe_code)]

//! `sensitive_words`: no secrets spliced into log messages
//!
//! This rule looks at the message expression, not its resolved text. Every
//! identifier and member-access field reachable through operators,
//! parentheses and calls is compared against the configured words. A name
//! matches when it equals a word ignoring case, or when a run of its
//! camelCase or snake_case segments spells the word (`passwordVar`,
//! `apiKey`, `user_access_token`). No fix is offered.

use crate::config::{RuleOptions, parse_options};
use crate::error::ConfigError;
use crate::rules::{CheckContext, Rule, RuleMeta, RuleResult};
use crate::syntax::{Expr, Ident};
use serde::Deserialize;

pub const NAME: &str = "sensitive_words";

pub const DEFAULT_SENSITIVE_WORDS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "api_key",
    "apikey",
    "auth",
    "credential",
    "private_key",
    "access_token",
    "refresh_token",
    "bearer",
    "secret_key",
    "encryption_key",
];

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SensitiveWordsOptions {
    #[serde(default)]
    words: Vec<String>,
}

pub struct SensitiveWordsRule {
    meta: RuleMeta,
    words: Vec<String>,
}

impl SensitiveWordsRule {
    pub fn new() -> Self {
        SensitiveWordsRule {
            meta: RuleMeta::new(
                NAME,
                "Checks that log messages don't contain sensitive variables",
            ),
            words: DEFAULT_SENSITIVE_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }

    pub fn boxed() -> Box<dyn Rule> {
        Box::new(Self::new())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for SensitiveWordsRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Split an identifier into lowercase camelCase / snake_case segments
fn segments(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                parts.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower)
            {
                parts.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// True if `name` spells any of `words` (lowercase) by the matching rules above
pub fn is_sensitive_name(name: &str, words: &[String]) -> bool {
    let lowered = name.to_lowercase();
    if words.iter().any(|w| *w == lowered) {
        return true;
    }

    let parts = segments(name);
    for start in 0..parts.len() {
        for end in start + 1..=parts.len() {
            let run = &parts[start..end];
            let joined = run.concat();
            let snake = run.join("_");
            if words.iter().any(|w| *w == joined || *w == snake) {
                return true;
            }
        }
    }
    false
}

/// First identifier in `expr` whose name is sensitive, in walk order
///
/// Binary operands are visited left to right and call arguments before the
/// callee. Only the field of a member access is inspected, never its operand.
pub fn find_sensitive_name<'e>(expr: &'e Expr, words: &[String]) -> Option<&'e Ident> {
    match expr {
        Expr::Ident(ident) => is_sensitive_name(&ident.name, words).then_some(ident),
        Expr::Selector { field, .. } => is_sensitive_name(&field.name, words).then_some(field),
        Expr::Binary { left, right, .. } => find_sensitive_name(left, words)
            .or_else(|| find_sensitive_name(right, words)),
        Expr::Unary { operand, .. } | Expr::Star { operand, .. } => {
            find_sensitive_name(operand, words)
        }
        Expr::Paren { inner, .. } => find_sensitive_name(inner, words),
        Expr::Call(call) => call
            .args
            .iter()
            .find_map(|arg| find_sensitive_name(arg, words))
            .or_else(|| find_sensitive_name(&call.function, words)),
        Expr::StringLit(_) | Expr::Other { .. } => None,
    }
}

impl Rule for SensitiveWordsRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RuleMeta {
        &mut self.meta
    }

    fn configure(&mut self, options: &RuleOptions) -> Result<(), ConfigError> {
        let options: SensitiveWordsOptions = parse_options(NAME, options)?;
        if options.words.is_empty() {
            return Ok(());
        }

        let mut words = Vec::with_capacity(options.words.len());
        for word in options.words {
            let word = word.trim().to_lowercase();
            if word.is_empty() {
                return Err(ConfigError::InvalidOption {
                    rule: NAME.to_string(),
                    message: "words must not contain empty entries".to_string(),
                });
            }
            words.push(word);
        }
        self.words = words;
        Ok(())
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> RuleResult {
        match find_sensitive_name(ctx.expr(), &self.words) {
            Some(ident) => RuleResult::fail(format!(
                "log message contains sensitive variable: {}",
                ident.name
            )),
            None => RuleResult::pass(),
        }
    }
}

#![forbid(unsafe_code)]

//! `english_only`: every letter in the message is Latin script
//!
//! This is a script filter. Digits, punctuation, symbols and emoji are not
//! letters and are ignored here; `no_special_chars` deals with them.

use crate::rules::{CheckContext, Rule, RuleMeta, RuleResult};
use regex::Regex;
use std::sync::LazyLock;

pub const NAME: &str = "english_only";

/// Any letter whose Unicode script is not Latin
static NON_LATIN_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}&&\P{Script=Latin}]").expect("constant pattern compiles")
});

/// First letter that is not Latin script
pub fn find_non_latin_letter(message: &str) -> Option<char> {
    NON_LATIN_LETTER
        .find(message)
        .and_then(|m| m.as_str().chars().next())
}

pub struct EnglishOnlyRule {
    meta: RuleMeta,
}

impl EnglishOnlyRule {
    pub fn new() -> Self {
        EnglishOnlyRule {
            meta: RuleMeta::new(NAME, "Checks that log messages are in English"),
        }
    }

    pub fn boxed() -> Box<dyn Rule> {
        Box::new(Self::new())
    }
}

impl Default for EnglishOnlyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EnglishOnlyRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RuleMeta {
        &mut self.meta
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> RuleResult {
        match find_non_latin_letter(ctx.message()) {
            Some(_) => RuleResult::fail("log message should be in English only"),
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
        EnglishOnlyRule::new().check(&CheckContext::new(&expr, message))
    }

    #[test]
    fn test_latin_text_passes() {
        let messages = [
            "starting server",
            "Starting server on port 8080",
            "café résumé naïve",
            "Straße geschlossen",
            "łódź",
            "",
            "12345 !!! @#$",
            "rocket 🚀",
            "ﬁle ligature",
            "status \u{10780}",
            "status \u{1DF00}",
            "ᴀ small capital",
        ];
        for message in messages {
            assert!(check(message).is_pass(), "expected pass for {:?}", message);
        }
    }

    #[test]
    fn test_non_latin_letters_fail_anywhere() {
        let messages = [
            ("запуск сервера", 'з'),
            ("server запущен", 'з'),
            ("starting 服务器", '服'),
            ("خطأ في الاتصال", 'خ'),
            ("status: ok ω", 'ω'),
            ("こんにちは", 'こ'),
            ("status \u{1D26}", '\u{1D26}'),
            ("status \u{1D2B}", '\u{1D2B}'),
            ("status \u{AB65}", '\u{AB65}'),
        ];
        for (message, first) in messages {
            assert_eq!(find_non_latin_letter(message), Some(first));
            let result = check(message);
            assert_eq!(
                result.failure().map(|f| f.message.as_str()),
                Some("log message should be in English only"),
                "expected failure for {:?}",
                message
            );
            assert!(result.failure().unwrap().fix.is_none());
        }
    }

    #[test]
    fn test_non_letter_scripts_are_ignored() {
        // Arabic-Indic and Devanagari digits are numbers, not letters
        assert_eq!(find_non_latin_letter("value ٣ and ५"), None);
    }
}

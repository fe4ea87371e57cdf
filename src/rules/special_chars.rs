#![forbid(unsafe_code)]

//! `no_special_chars`: no emojis, shouting punctuation, or stray symbols
//!
//! Letters, digits, and whitespace are always fine. Punctuation must come from
//! [`ALLOWED_PUNCTUATION`] and may not repeat back to back; more than two dots
//! anywhere reads as an ellipsis.

use crate::rules::{CheckContext, Rule, RuleMeta, RuleResult};
use std::fmt;

pub const NAME: &str = "no_special_chars";

pub const ALLOWED_PUNCTUATION: &[char] = &[
    '.', ',', ':', ';', '-', '_', '/', '\\', '(', ')', '[', ']', '{', '}', '=', '+', '"', '\'',
    '<', '>', '?',
];

pub const PROBLEMATIC_SYMBOLS: &[char] = &['@', '#', '$', '%', '^', '&', '*', '|', '`', '~', '!'];

const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // misc symbols and pictographs
    (0x1F680, 0x1F6FF), // transport and map
    (0x1F1E0, 0x1F1FF), // regional indicators
    (0x2600, 0x26FF),   // misc symbols
    (0x2700, 0x27BF),   // dingbats
    (0xFE00, 0xFE0F),   // variation selectors
    (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
];

const MAX_DOTS: usize = 2;

/// First reason a message is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialChar {
    /// Same punctuation character twice in a row
    Repeated(char),
    Emoji(char),
    /// One of [`PROBLEMATIC_SYMBOLS`]
    Symbol(char),
    /// Any other character outside the allow-list
    Disallowed(char),
    /// Three or more dots in the message
    Ellipsis,
}

impl fmt::Display for SpecialChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialChar::Repeated(c) => write!(f, "repeated '{}'", c),
            SpecialChar::Emoji(c) => write!(f, "emoji '{}'", c),
            SpecialChar::Symbol(c) => write!(f, "symbol '{}'", c),
            SpecialChar::Disallowed(c) => write!(f, "character '{}'", c),
            SpecialChar::Ellipsis => write!(f, "ellipsis"),
        }
    }
}

fn is_plain(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric() || c.is_whitespace()
}

pub fn is_emoji(c: char) -> bool {
    let code = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

/// Scan left to right and report the first disqualifying character
///
/// The dot count is a whole-message property and is only consulted when the
/// per-character scan found nothing.
pub fn find_special_char(message: &str) -> Option<SpecialChar> {
    let chars: Vec<char> = message.chars().collect();
    let mut dots = 0;

    for (i, &c) in chars.iter().enumerate() {
        if is_plain(c) {
            continue;
        }

        if c == '.' {
            dots += 1;
        }

        let repeated = (i > 0 && chars[i - 1] == c) || chars.get(i + 1) == Some(&c);
        if repeated {
            return Some(SpecialChar::Repeated(c));
        }

        if ALLOWED_PUNCTUATION.contains(&c) {
            continue;
        }

        if is_emoji(c) {
            return Some(SpecialChar::Emoji(c));
        }

        if PROBLEMATIC_SYMBOLS.contains(&c) {
            return Some(SpecialChar::Symbol(c));
        }

        return Some(SpecialChar::Disallowed(c));
    }

    if dots > MAX_DOTS {
        return Some(SpecialChar::Ellipsis);
    }

    None
}

/// Strip everything [`find_special_char`] would reject
///
/// Disallowed characters are dropped, runs of the same punctuation collapse to
/// one, and dots past the second are dropped, so the result always passes.
pub fn clean_special_chars(message: &str) -> String {
    let mut cleaned = String::with_capacity(message.len());
    let mut last_kept: Option<char> = None;
    let mut dots = 0;

    for c in message.chars() {
        if !is_plain(c) {
            if !ALLOWED_PUNCTUATION.contains(&c) || last_kept == Some(c) {
                continue;
            }
            if c == '.' {
                if dots == MAX_DOTS {
                    continue;
                }
                dots += 1;
            }
        }
        cleaned.push(c);
        last_kept = Some(c);
    }

    cleaned
}

pub struct NoSpecialCharsRule {
    meta: RuleMeta,
}

impl NoSpecialCharsRule {
    pub fn new() -> Self {
        NoSpecialCharsRule {
            meta: RuleMeta::new(
                NAME,
                "Checks that log messages don't contain special characters or emojis",
            ),
        }
    }

    pub fn boxed() -> Box<dyn Rule> {
        Box::new(Self::new())
    }
}

impl Default for NoSpecialCharsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NoSpecialCharsRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RuleMeta {
        &mut self.meta
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> RuleResult {
        let Some(found) = find_special_char(ctx.message()) else {
            return RuleResult::pass();
        };

        RuleResult::fail_with_fix(
            format!(
                "log message should not contain special characters or emojis ({})",
                found
            ),
            "Remove special characters",
            clean_special_chars(ctx.message()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Expr;

    fn check(message: &str) -> RuleResult {
        let expr = Expr::string(message);
        NoSpecialCharsRule::new().check(&CheckContext::new(&expr, message))
    }

    #[test]
    fn test_find_special_char() {
        let cases = [
            ("server started", None),
            ("server started.", None),
            ("server started, listening", None),
            ("port: 8080", None),
            ("path=/var/log (rotated) [ok] {x} <y> a+b 'q' \"d\" c:\\tmp?", None),
            ("server started!", Some(SpecialChar::Symbol('!'))),
            ("connection failed!!", Some(SpecialChar::Repeated('!'))),
            ("something went wrong...", Some(SpecialChar::Repeated('.'))),
            ("user @localhost", Some(SpecialChar::Symbol('@'))),
            ("error #404", Some(SpecialChar::Symbol('#'))),
            ("server started 😀", Some(SpecialChar::Emoji('😀'))),
            ("price in €", Some(SpecialChar::Disallowed('€'))),
            ("a. b. c. d", Some(SpecialChar::Ellipsis)),
            ("a -- b", Some(SpecialChar::Repeated('-'))),
        ];

        for (message, expected) in cases {
            assert_eq!(
                find_special_char(message),
                expected,
                "find_special_char({:?})",
                message
            );
        }
    }

    #[test]
    fn test_first_problem_wins() {
        assert_eq!(
            find_special_char("a@b!!"),
            Some(SpecialChar::Symbol('@'))
        );
        assert_eq!(
            find_special_char("x!! y. z. w."),
            Some(SpecialChar::Repeated('!'))
        );
    }

    #[test]
    fn test_whitespace_runs_are_fine() {
        assert_eq!(find_special_char("two  spaces\t\ttabs"), None);
    }

    #[test]
    fn test_clean_special_chars() {
        assert_eq!(clean_special_chars("server started!!!"), "server started");
        assert_eq!(clean_special_chars("server started 😀"), "server started ");
        assert_eq!(
            clean_special_chars("something went wrong..."),
            "something went wrong."
        );
        assert_eq!(clean_special_chars("a-!-b"), "a-b");
        assert_eq!(clean_special_chars("a. b. c. d"), "a. b. c d");
        assert_eq!(clean_special_chars("user @localhost"), "user localhost");
    }

    #[test]
    fn test_cleanup_is_a_fixed_point() {
        let messages = [
            "server started!!!",
            "Connection failed!!",
            "wow... such log 🚀🚀",
            "a-!-b--c",
            "x.y.z.w",
            "((nested)) [[brackets]]",
            "mixed @#$ stuff ~~ here",
            "\"\"quoted\"\"",
        ];
        for message in messages {
            let cleaned = clean_special_chars(message);
            assert_eq!(
                find_special_char(&cleaned),
                None,
                "cleaned {:?} into {:?}",
                message,
                cleaned
            );
            assert_eq!(clean_special_chars(&cleaned), cleaned);
        }
    }

    #[test]
    fn test_rule_failure_carries_cleanup() {
        let result = check("server started!!!");
        let failure = result.failure().unwrap();
        assert!(
            failure
                .message
                .starts_with("log message should not contain special characters or emojis")
        );
        assert!(failure.message.contains("repeated '!'"));
        assert_eq!(failure.fix.as_ref().unwrap().new_text, "server started");
    }

    #[test]
    fn test_clean_message_passes() {
        assert!(check("cache miss for key user_123").is_pass());
        assert!(check("").is_pass());
    }
}

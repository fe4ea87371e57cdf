#![forbid(unsafe_code)]

//! Message resolution: the best-effort literal text of a message expression

use crate::rules::CheckContext;
use crate::syntax::Expr;

/// Literal text of `expr`
///
/// A string literal yields its decoded value. A `+` chain yields the
/// concatenation of its literal operands, left to right; identifiers, calls
/// and other operands contribute nothing. Parentheses are looked through.
/// Anything else resolves to the empty string.
pub fn resolve_message(expr: &Expr) -> String {
    let mut message = String::new();
    collect_literals(expr, &mut message);
    message
}

fn collect_literals(expr: &Expr, out: &mut String) {
    match expr {
        Expr::StringLit(lit) => out.push_str(&lit.value),
        Expr::Binary { left, right, .. } if expr.is_concat() => {
            collect_literals(left, out);
            collect_literals(right, out);
        }
        Expr::Paren { inner, .. } => collect_literals(inner, out),
        _ => {}
    }
}

/// Build the context every rule sees for one message expression
pub fn check_context(expr: &Expr) -> CheckContext<'_> {
    CheckContext::new(expr, resolve_message(expr))
}

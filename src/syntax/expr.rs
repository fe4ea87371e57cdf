#![forbid(unsafe_code)]

//! Host-independent expression tree
//!
//! Host adapters lower their native syntax into `Expr`; everything downstream
//! (extraction, message resolution, structural rules) walks this enum only.
//! Nodes built by hand (tests, other adapters) may use `Span::default()`.

use crate::types::Span;

/// Quoting used by a string literal in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"..."` with escape sequences
    Interpreted,
    /// `` `...` `` taken verbatim
    Raw,
}

/// A string literal with its decoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLit {
    pub span: Span,
    pub value: String,
    pub quote: QuoteStyle,
}

/// An identifier occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident {
            name: name.into(),
            span: Span::default(),
        }
    }
}

/// A call expression: `function(args...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub function: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

impl CallExpr {
    /// The `(receiver, method)` pair when the callee is a member access
    pub fn method_target(&self) -> Option<(&Expr, &Ident)> {
        match self.function.as_ref() {
            Expr::Selector { operand, field, .. } => Some((operand.as_ref(), field)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    StringLit(StringLit),
    Ident(Ident),
    /// Member access `operand.field`
    Selector {
        operand: Box<Expr>,
        field: Ident,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
        span: Span,
    },
    /// Prefix operator other than pointer dereference (`&x`, `-x`, `!x`, `<-ch`)
    Unary {
        op: String,
        operand: Box<Expr>,
        span: Span,
    },
    /// Pointer dereference `*x`
    Star { operand: Box<Expr>, span: Span },
    Call(CallExpr),
    Paren { inner: Box<Expr>, span: Span },
    /// Any expression the analysis does not look inside (numbers, composite
    /// literals, index expressions, function literals, ...)
    Other { span: Span },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::StringLit(lit) => lit.span,
            Expr::Ident(ident) => ident.span,
            Expr::Call(call) => call.span,
            Expr::Selector { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Star { span, .. }
            | Expr::Paren { span, .. }
            | Expr::Other { span } => *span,
        }
    }

    pub fn as_string_lit(&self) -> Option<&StringLit> {
        match self {
            Expr::StringLit(lit) => Some(lit),
            _ => None,
        }
    }

    /// True for a binary `+` node
    pub fn is_concat(&self) -> bool {
        matches!(self, Expr::Binary { op, .. } if op == "+")
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLit(StringLit {
            span: Span::default(),
            value: value.into(),
            quote: QuoteStyle::Interpreted,
        })
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(Ident::new(name))
    }

    pub fn selector(operand: Expr, field: impl Into<String>) -> Self {
        Expr::Selector {
            operand: Box::new(operand),
            field: Ident::new(field),
            span: Span::default(),
        }
    }

    pub fn concat(left: Expr, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op: "+".to_string(),
            right: Box::new(right),
            span: Span::default(),
        }
    }

    pub fn call(function: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            function: Box::new(function),
            args,
            span: Span::default(),
        })
    }

    pub fn with_span(mut self, new_span: Span) -> Self {
        match &mut self {
            Expr::StringLit(lit) => lit.span = new_span,
            Expr::Ident(ident) => ident.span = new_span,
            Expr::Call(call) => call.span = new_span,
            Expr::Selector { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Star { span, .. }
            | Expr::Paren { span, .. }
            | Expr::Other { span } => *span = new_span,
        }
        self
    }
}

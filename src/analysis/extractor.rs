#![forbid(unsafe_code)]

//! Call-site extraction: picks the logging calls out of a stream of calls

use crate::analysis::api::LoggingApi;
use crate::syntax::{CallExpr, Expr, Symbol, SymbolResolver};
use crate::types::Span;

/// A logging call together with the position of its message argument
///
/// Only built by the extractor, which guarantees the argument exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    call: CallExpr,
    message_index: usize,
}

impl CallSite {
    pub fn call(&self) -> &CallExpr {
        &self.call
    }

    /// The message argument expression
    pub fn message(&self) -> &Expr {
        &self.call.args[self.message_index]
    }

    pub fn message_index(&self) -> usize {
        self.message_index
    }

    pub fn method(&self) -> &str {
        self.call
            .method_target()
            .map(|(_, method)| method.name.as_str())
            .unwrap_or_default()
    }

    pub fn span(&self) -> Span {
        self.call.span
    }
}

/// Matches calls against the configured logging APIs
pub struct CallSiteExtractor<'a> {
    apis: &'a [LoggingApi],
    symbols: &'a dyn SymbolResolver,
}

impl<'a> CallSiteExtractor<'a> {
    pub fn new(apis: &'a [LoggingApi], symbols: &'a dyn SymbolResolver) -> Self {
        CallSiteExtractor { apis, symbols }
    }

    /// Lazily keep the calls that are log calls, preserving order
    pub fn extract<I>(&self, calls: I) -> impl Iterator<Item = CallSite>
    where
        I: IntoIterator<Item = CallExpr>,
    {
        calls.into_iter().filter_map(|call| self.match_call(call))
    }

    /// Turn one call into a call site if it logs through a known API
    pub fn match_call(&self, call: CallExpr) -> Option<CallSite> {
        let (receiver, method) = call.method_target()?;
        let symbol = self.receiver_symbol(receiver)?;

        let message_index = self.apis.iter().find_map(|api| {
            let index = api.message_index(&method.name)?;
            api.accepts(symbol).then_some(index)
        })?;

        if call.args.len() <= message_index {
            return None;
        }

        Some(CallSite {
            call,
            message_index,
        })
    }

    /// `recv` or `recv.field` resolves through the base identifier
    fn receiver_symbol(&self, receiver: &Expr) -> Option<&'a Symbol> {
        let ident = match receiver {
            Expr::Ident(ident) => ident,
            Expr::Selector { operand, .. } => match operand.as_ref() {
                Expr::Ident(ident) => ident,
                _ => return None,
            },
            _ => return None,
        };
        self.symbols.resolve(ident)
    }
}

#![forbid(unsafe_code)]

//! Syntax layer: the expression tree the analysis walks, symbol lookup, and
//! the Go host adapter that produces both

pub mod expr;
pub mod go;
pub mod symbols;

pub use expr::{CallExpr, Expr, Ident, QuoteStyle, StringLit};
pub use go::{GoSource, SourceError};
pub use symbols::{Symbol, SymbolResolver, SymbolTable, TypeRef};

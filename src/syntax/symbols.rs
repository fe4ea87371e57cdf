#![forbid(unsafe_code)]

//! Symbol resolution seam between host adapters and call-site extraction

use crate::syntax::expr::Ident;
use std::collections::HashMap;

/// A named type, qualified by the import path of its package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub package: String,
    pub name: String,
    pub pointer: bool,
}

/// What an identifier refers to, as far as the host can tell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// An imported package, by import path
    Package { path: String },
    /// A variable or parameter with a declared type
    Value { ty: TypeRef },
    /// A variable initialised from `pkg.function(...)`, type unknown to the host
    CallResult { package: String, function: String },
}

/// Per-identifier symbol lookup supplied by the host
pub trait SymbolResolver {
    fn resolve(&self, ident: &Ident) -> Option<&Symbol>;
}

/// A flat, scope-insensitive name → symbol table
///
/// Later bindings of the same name replace earlier ones. The blank identifier
/// is never bound.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, symbol: Symbol) {
        let name = name.into();
        if name.is_empty() || name == "_" {
            return;
        }
        self.bindings.insert(name, symbol);
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.bindings.get(name)
    }

    /// Import path bound to `name`, if it names a package
    pub fn package_path(&self, name: &str) -> Option<&str> {
        match self.bindings.get(name) {
            Some(Symbol::Package { path }) => Some(path),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&self, ident: &Ident) -> Option<&Symbol> {
        self.get(&ident.name)
    }
}

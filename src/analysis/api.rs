#![forbid(unsafe_code)]

//! Logging API definitions: which receivers and methods count as log calls

use crate::config::ApiConfig;
use crate::syntax::Symbol;
use std::collections::{BTreeMap, BTreeSet};

pub const SLOG_PACKAGE: &str = "log/slog";
pub const ZAP_PACKAGE: &str = "go.uber.org/zap";

/// A logger surface: one package, its logger type, and its log-emitting methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingApi {
    package: String,
    type_name: Option<String>,
    package_level: bool,
    /// method name → position of the message argument
    methods: BTreeMap<String, usize>,
    constructors: BTreeSet<String>,
}

impl LoggingApi {
    pub fn new(package: impl Into<String>, type_name: Option<&str>, package_level: bool) -> Self {
        LoggingApi {
            package: package.into(),
            type_name: type_name.map(str::to_string),
            package_level,
            methods: BTreeMap::new(),
            constructors: BTreeSet::new(),
        }
    }

    /// Add methods whose message is the first argument
    pub fn with_methods(mut self, methods: &[&str]) -> Self {
        for method in methods {
            self.methods.insert(method.to_string(), 0);
        }
        self
    }

    /// Add (or re-index) a method whose message sits at `index`
    pub fn with_method_at(mut self, method: &str, index: usize) -> Self {
        self.methods.insert(method.to_string(), index);
        self
    }

    pub fn with_constructors(mut self, constructors: &[&str]) -> Self {
        self.constructors
            .extend(constructors.iter().map(|c| c.to_string()));
        self
    }

    /// `log/slog`: package functions and `*slog.Logger` methods
    ///
    /// `Log`/`LogAttrs` take `(ctx, level, msg, ...)` and the `...Context`
    /// variants take `(ctx, msg, ...)`.
    pub fn slog() -> Self {
        LoggingApi::new(SLOG_PACKAGE, Some("Logger"), true)
            .with_methods(&["Debug", "Info", "Warn", "Error"])
            .with_method_at("Log", 2)
            .with_method_at("LogAttrs", 2)
            .with_method_at("DebugContext", 1)
            .with_method_at("InfoContext", 1)
            .with_method_at("WarnContext", 1)
            .with_method_at("ErrorContext", 1)
            .with_constructors(&["New", "Default", "With"])
    }

    /// `go.uber.org/zap`: `*zap.Logger` methods only
    pub fn zap() -> Self {
        LoggingApi::new(ZAP_PACKAGE, Some("Logger"), false)
            .with_methods(&["Debug", "Info", "Warn", "Error", "DPanic", "Panic", "Fatal"])
            .with_constructors(&[
                "New",
                "NewProduction",
                "NewDevelopment",
                "NewExample",
                "NewNop",
                "Must",
                "L",
            ])
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::slog(), Self::zap()]
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        let mut api = LoggingApi::new(
            config.package.clone(),
            config.type_name.as_deref(),
            config.package_level,
        );
        for method in &config.methods {
            let index = config.message_args.get(method).copied().unwrap_or(0);
            api.methods.insert(method.clone(), index);
        }
        api.constructors.extend(config.constructors.iter().cloned());
        api
    }

    /// APIs from `[[apis]]` entries, or the defaults when there are none
    pub fn from_configs(configs: &[ApiConfig]) -> Vec<Self> {
        if configs.is_empty() {
            return Self::defaults();
        }
        configs.iter().map(Self::from_config).collect()
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn package_level(&self) -> bool {
        self.package_level
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Position of the message argument, if `method` logs
    pub fn message_index(&self, method: &str) -> Option<usize> {
        self.methods.get(method).copied()
    }

    /// Whether a receiver bound to `symbol` is a logger of this API
    pub fn accepts(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Package { path } => self.package_level && *path == self.package,
            Symbol::Value { ty } => {
                ty.package == self.package && self.type_name.as_deref() == Some(ty.name.as_str())
            }
            Symbol::CallResult { package, function } => {
                *package == self.package && self.constructors.contains(function)
            }
        }
    }
}

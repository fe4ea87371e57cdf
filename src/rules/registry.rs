#![forbid(unsafe_code)]

//! Rule registry for constructing and configuring rules
//!
//! The RuleRegistry is responsible for:
//! - Registering rule builders under unique names
//! - Registering the built-in rules exactly once per registry
//! - Instantiating and configuring rules from `[rules]` settings

use crate::config::RulesConfig;
use crate::error::{ConfigError, RuleError};
use crate::rules::Rule;
use crate::rules::builtin::BUILTIN_RULES;
use crate::types::RuleName;

/// Builds a fresh, unconfigured rule instance
pub type RuleBuilder = Box<dyn Fn() -> Box<dyn Rule> + Send + Sync>;

/// Name → builder mapping, kept in registration order
///
/// A registry is an ordinary value: construct one, register into it, and pass
/// it to whatever needs rules. Nothing is global.
pub struct RuleRegistry {
    builders: Vec<(RuleName, RuleBuilder)>,
    builtins_registered: bool,
}

impl RuleRegistry {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self {
            builders: Vec::new(),
            builtins_registered: false,
        }
    }

    /// Create a registry with the built-in rules already registered
    ///
    /// # Errors
    ///
    /// Returns `RuleError` only if a built-in name is malformed.
    pub fn with_builtins() -> Result<Self, RuleError> {
        let mut registry = Self::new();
        registry.register_builtins()?;
        Ok(registry)
    }

    /// Register a rule builder under `name`
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidName` if the name is empty or malformed, and
    /// `RuleError::Duplicate` if the name is already taken.
    pub fn register<F>(&mut self, name: &str, builder: F) -> Result<(), RuleError>
    where
        F: Fn() -> Box<dyn Rule> + Send + Sync + 'static,
    {
        let rule_name =
            RuleName::new(name).ok_or_else(|| RuleError::InvalidName(name.to_string()))?;

        if self.contains(name) {
            return Err(RuleError::Duplicate(name.to_string()));
        }

        tracing::debug!(rule = name, "registered rule");
        self.builders.push((rule_name, Box::new(builder)));
        Ok(())
    }

    /// Register the built-in rules; later calls do nothing
    ///
    /// # Errors
    ///
    /// Returns `RuleError::Duplicate` if a user rule already took a built-in
    /// name; no built-in is registered in that case.
    pub fn register_builtins(&mut self) -> Result<(), RuleError> {
        if self.builtins_registered {
            return Ok(());
        }

        // All or nothing: a collision must not leave some built-ins behind
        if let Some((name, _)) = BUILTIN_RULES.iter().find(|(name, _)| self.contains(name)) {
            return Err(RuleError::Duplicate(name.to_string()));
        }

        for (name, build) in BUILTIN_RULES {
            let build = *build;
            self.register(name, build)?;
        }

        self.builtins_registered = true;
        Ok(())
    }

    /// Construct a fresh instance of the rule registered under `name`
    ///
    /// # Errors
    ///
    /// Returns `RuleError::NotFound` if no rule has that name.
    pub fn get(&self, name: &str) -> Result<Box<dyn Rule>, RuleError> {
        self.builders
            .iter()
            .find(|(rule_name, _)| rule_name.as_str() == name)
            .map(|(_, build)| build())
            .ok_or_else(|| RuleError::NotFound(name.to_string()))
    }

    /// Construct one fresh instance of every rule, in registration order
    pub fn get_all(&self) -> Vec<Box<dyn Rule>> {
        self.builders.iter().map(|(_, build)| build()).collect()
    }

    /// Instantiate every rule and apply its `[rules]` entry
    ///
    /// Rules without an entry keep their defaults. Disabled rules are still
    /// returned, with their enabled flag cleared.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownRule` for entries naming no registered rule,
    /// or whatever the rule's own `configure` rejects.
    pub fn instantiate(&self, config: &RulesConfig) -> Result<Vec<Box<dyn Rule>>, ConfigError> {
        for (name, _) in config.iter() {
            if !self.contains(name.as_str()) {
                return Err(ConfigError::UnknownRule(name.to_string()));
            }
        }

        let mut rules = Vec::with_capacity(self.builders.len());
        for (name, build) in &self.builders {
            let mut rule = build();
            if let Some(value) = config.get(name.as_str()) {
                rule.configure(&value.options())?;
                rule.set_enabled(value.is_enabled());
                tracing::debug!(rule = %name, enabled = rule.enabled(), "configured rule");
            }
            rules.push(rule);
        }
        Ok(rules)
    }

    /// Like [`instantiate`](Self::instantiate), keeping only enabled rules
    ///
    /// # Errors
    ///
    /// Same as [`instantiate`](Self::instantiate).
    pub fn configured_rules(
        &self,
        config: &RulesConfig,
    ) -> Result<Vec<Box<dyn Rule>>, ConfigError> {
        let mut rules = self.instantiate(config)?;
        rules.retain(|rule| rule.enabled());
        Ok(rules)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders
            .iter()
            .any(|(rule_name, _)| rule_name.as_str() == name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builders.iter().map(|(name, _)| name.as_str())
    }

    /// Get the number of registered rules
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

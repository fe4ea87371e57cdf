//! Parsing and validation for loglint.toml configuration files

use crate::error::ConfigError;
use crate::types::{GlobPattern, RuleName};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "loglint.toml";

/// Rule-specific options, exactly as written in the rule's settings table
pub type RuleOptions = BTreeMap<String, toml::Value>;

/// Main configuration struct for loglint.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Loglint metadata
    #[serde(default)]
    pub loglint: LintMeta,

    /// Logging APIs to recognise; empty means the built-in slog and zap definitions
    #[serde(default)]
    pub apis: Vec<ApiConfig>,

    /// Rule configuration
    #[serde(default)]
    pub rules: RulesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid TOML or fails validation.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.loglint.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.loglint.version
            )));
        }

        for pattern in &self.loglint.include {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid include glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        for pattern in &self.loglint.exclude {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid exclude glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        for api in &self.apis {
            api.validate()?;
        }

        Ok(())
    }
}

/// Loglint metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintMeta {
    /// Configuration version (must be "1")
    #[serde(default = "default_version")]
    pub version: String,

    /// File patterns to include
    #[serde(default = "default_include")]
    pub include: Vec<GlobPattern>,

    /// File patterns to exclude
    #[serde(default)]
    pub exclude: Vec<GlobPattern>,
}

impl Default for LintMeta {
    fn default() -> Self {
        LintMeta {
            version: default_version(),
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

fn default_version() -> String {
    "1".to_string()
}

fn default_include() -> Vec<GlobPattern> {
    vec![GlobPattern::new("**/*.go")]
}

/// One `[[apis]]` entry describing a logger surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Import path of the logging package
    pub package: String,

    /// Logger type declared in that package, e.g. `Logger` for `*zap.Logger`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Whether `pkg.Method(...)` calls directly on the package log
    #[serde(default)]
    pub package_level: bool,

    /// Methods that emit a log message
    pub methods: Vec<String>,

    /// Package functions returning a logger value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<String>,

    /// Message argument position per method; unlisted methods use 0
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub message_args: BTreeMap<String, usize>,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.package.is_empty() {
            return Err(ConfigError::Validation(
                "Logging API entry has an empty package path".to_string(),
            ));
        }

        if self.methods.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Logging API '{}' lists no methods",
                self.package
            )));
        }

        if !self.package_level && self.type_name.is_none() {
            return Err(ConfigError::Validation(format!(
                "Logging API '{}' must set package_level or name a logger type",
                self.package
            )));
        }

        for method in self.message_args.keys() {
            if !self.methods.contains(method) {
                return Err(ConfigError::Validation(format!(
                    "message_args for '{}' names '{}', which is not one of its methods",
                    self.package, method
                )));
            }
        }

        Ok(())
    }
}

/// Rules configuration section, keyed by rule name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesConfig {
    pub rules: BTreeMap<RuleName, RuleValue>,
}

impl RulesConfig {
    pub fn get(&self, name: &str) -> Option<&RuleValue> {
        let name = RuleName::new(name)?;
        self.rules.get(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RuleName, &RuleValue)> {
        self.rules.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A rule can be enabled with a boolean or configured with settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// Simple boolean enable/disable
    Enabled(bool),
    /// Settings table for the rule
    Settings(RuleSettings),
}

impl RuleValue {
    /// A settings table without `enabled` leaves the rule on
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleValue::Enabled(enabled) => *enabled,
            RuleValue::Settings(settings) => settings.enabled.unwrap_or(true),
        }
    }

    /// Rule-specific options; empty for the boolean form
    pub fn options(&self) -> RuleOptions {
        match self {
            RuleValue::Enabled(_) => RuleOptions::new(),
            RuleValue::Settings(settings) => settings.options.clone(),
        }
    }
}

/// Settings for individual rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Everything else in the table, handed to the rule to interpret
    #[serde(flatten)]
    pub options: RuleOptions,
}

/// Deserialize a rule's options table into its typed option struct
///
/// # Errors
///
/// Returns `ConfigError::InvalidOption` naming `rule` when the table does not
/// fit `T` (unknown key, wrong type, missing field).
pub fn parse_options<T: DeserializeOwned>(
    rule: &str,
    options: &RuleOptions,
) -> Result<T, ConfigError> {
    let table: toml::Table = options
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::InvalidOption {
            rule: rule.to_string(),
            message: e.message().trim().to_string(),
        })
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

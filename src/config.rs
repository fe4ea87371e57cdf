//! Configuration file parsing and validation

pub mod loglint_toml;

pub use loglint_toml::{
    ApiConfig, ColorOption, Config, LintMeta, OutputConfig, OutputFormat, RuleOptions,
    RuleSettings, RuleValue, RulesConfig, parse_options,
};

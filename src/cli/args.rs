//! CLI argument parsing using clap

use crate::config::{ColorOption, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Loglint CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "loglint")]
#[command(about = "Style and security checks for Go log messages")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides the config file)
    #[arg(long, global = true)]
    pub color: Option<ColorOption>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available loglint subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check Go files for log message problems
    Check {
        /// Files or directories to check
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format (overrides the config file)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Configuration file (defaults to ./loglint.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the available rules and whether they are enabled
    List {
        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Configuration file (defaults to ./loglint.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter loglint.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

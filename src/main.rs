//! Loglint CLI entry point

use clap::Parser;
use loglint::cli::{Cli, Command};
use loglint::cli::init::InitOutcome;
use std::process;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for diagnostics on stderr.
///
/// Log level is controlled by:
/// 1. `--verbose` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("loglint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("loglint=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("loglint starting with args: {:?}", cli);

    let exit_code = match cli.command {
        Command::Init { force } => match loglint::cli::init::run_init(force) {
            Ok(InitOutcome::Created) => {
                println!("Created loglint.toml.");
                0
            }
            Ok(InitOutcome::Overwritten) => {
                println!("Overwrote loglint.toml.");
                0
            }
            Ok(InitOutcome::Skipped) => {
                println!("loglint.toml already exists. Use --force to overwrite it.");
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
        Command::Check {
            paths,
            format,
            config,
        } => loglint::cli::check::run_check(&paths, format, config.as_deref(), cli.color),
        Command::List { format, config } => {
            loglint::cli::list::run_list(format, config.as_deref())
        }
    };

    process::exit(exit_code);
}

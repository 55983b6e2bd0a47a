//! # afip CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use afip_cli::cuit::{run_cuit, CuitArgs};
use afip_cli::period::{run_period, PeriodArgs};
use afip_cli::sua::{run_sua, SuaArgs};

/// AFIP identifier toolkit.
///
/// Validates and generates CUIT/CUIL numbers, checks reporting periods and
/// verifies SUA login tickets.
#[derive(Parser, Debug)]
#[command(name = "afip", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the ticket policy YAML file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// CUIT/CUIL validation, formatting and generation.
    Cuit(CuitArgs),

    /// Annual, monthly and daily period checks.
    Period(PeriodArgs),

    /// SUA login ticket verification.
    Sua(SuaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Cuit(args) => run_cuit(&args),
        Commands::Period(args) => run_period(&args),
        Commands::Sua(args) => run_sua(&args, cli.config.as_deref()),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#![deny(missing_docs)]

//! # P2D CLI
//!
//! Command Line Interface for the Prisma -> Django model generator.
//!
//! Supported Commands:
//! - `convert`: Prisma schema file -> Django `models.py`.
//! - `types`: Prints the effective type mapping table.

use clap::{Parser, Subcommand};
use p2d_core::AppResult;
use tracing_subscriber::EnvFilter;

mod convert;
mod table_args;
mod types;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Prisma schema to Django models")]
struct Cli {
    /// Log debug diagnostics to stderr (overrides `RUST_LOG`).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a Prisma schema into Django model classes.
    Convert(convert::ConvertArgs),
    /// Print the effective type mapping table as JSON.
    Types(types::TypesArgs),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Convert(args) => convert::execute(args)?,
        Commands::Types(args) => types::execute(args)?,
    }

    Ok(())
}

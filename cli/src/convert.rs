#![deny(missing_docs)]

//! # Convert Command
//!
//! Reads a Prisma schema file and writes the generated Django models.

use crate::table_args::TableArgs;
use p2d_core::{AppError, AppResult, SchemaConverter};
use std::fs;
use std::path::PathBuf;

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the Prisma schema (e.g. prisma/schema.prisma).
    #[clap(long, short)]
    pub input: PathBuf,

    /// Output path for the generated models.
    /// If not provided, prints to stdout.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Prefix the classes with the `import` lines they need.
    #[clap(long)]
    pub with_imports: bool,

    #[clap(flatten)]
    pub table: TableArgs,
}

/// Produces the generated source for `args` without writing it anywhere.
pub fn render(args: &ConvertArgs) -> AppResult<String> {
    if !args.input.exists() {
        return Err(AppError::General(format!(
            "Schema file not found: {:?}",
            args.input
        )));
    }

    let schema = fs::read_to_string(&args.input)?;

    let converter = SchemaConverter::with_table(args.table.resolve()?);
    let code = if args.with_imports {
        converter.convert_module(&schema)
    } else {
        converter.convert(&schema)
    };

    if code.is_empty() {
        tracing::warn!(input = ?args.input, "no model blocks found");
    }
    Ok(code)
}

/// Executes the conversion.
pub fn execute(args: &ConvertArgs) -> AppResult<()> {
    let code = render(args)?;

    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(out_path, code)?;
        tracing::info!(output = ?out_path, "models generated");
    } else {
        print!("{}", code);
    }

    Ok(())
}

#![deny(missing_docs)]

//! # Types Command
//!
//! Prints the effective type mapping table as pretty JSON.

use crate::table_args::TableArgs;
use p2d_core::{AppError, AppResult, TypeMappingTable};

/// Arguments for the types command.
#[derive(clap::Args, Debug, Clone)]
pub struct TypesArgs {
    #[clap(flatten)]
    pub table: TableArgs,
}

/// Renders the table as JSON.
pub fn render(table: &TypeMappingTable) -> AppResult<String> {
    serde_json::to_string_pretty(table)
        .map_err(|e| AppError::General(format!("JSON serialization failed: {}", e)))
}

/// Executes the types command.
pub fn execute(args: &TypesArgs) -> AppResult<()> {
    let table = args.table.resolve()?;
    println!("{}", render(&table)?);
    Ok(())
}

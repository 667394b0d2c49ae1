#![deny(missing_docs)]

//! # Type Table Arguments
//!
//! Shared `--config` / `--map` options resolving the effective type table.

use p2d_core::{parse_type_override, AppResult, FieldConstructor, MappingConfig, TypeMappingTable};
use std::path::PathBuf;

/// Options that customize the Prisma -> Django type table.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// JSON or YAML file with type mapping overrides.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Override a single mapping.
    /// Format: `"PrismaType=DjangoField(args)"`.
    /// Example: `"--map DateTime=DateTimeField(auto_now_add=True)"`
    #[clap(long, value_parser = parse_map)]
    pub map: Vec<(String, FieldConstructor)>,
}

fn parse_map(s: &str) -> Result<(String, FieldConstructor), String> {
    parse_type_override(s).map_err(|e| e.to_string())
}

impl TableArgs {
    /// Built-in table, then the config file, then `--map` entries.
    pub fn resolve(&self) -> AppResult<TypeMappingTable> {
        let config = match &self.config {
            Some(path) => MappingConfig::load(path)?,
            None => MappingConfig::default(),
        };

        let mut table = config.into_table();
        for (ty, ctor) in &self.map {
            table.insert(ty.clone(), ctor.clone());
        }
        Ok(table)
    }
}

#![deny(missing_docs)]

//! # P2D Core
//!
//! Core library for converting Prisma schema text into Django model classes.

/// Shared error types.
pub mod error;

/// Model block and field line extraction.
pub mod parser;

/// Type mapping logic (Prisma -> Django field).
pub mod type_mapping;

/// Special-case field and relation rules.
pub mod rules;

/// Django model class generation.
pub mod codegen;

/// Type table configuration files.
pub mod config;

pub use codegen::{convert_schema, table_name, ModelGenerator, SchemaConverter};
pub use config::{parse_type_override, MappingConfig};
pub use error::{AppError, AppResult};
pub use parser::{extract_field_declarations, extract_model_blocks, FieldDeclaration, ModelBlock};
pub use rules::{FieldRule, PrimaryKeyRule, RelationRule, SubstringRelationRule};
pub use type_mapping::{DjangoFieldMapper, FieldConstructor, FieldMapper, TypeMappingTable};

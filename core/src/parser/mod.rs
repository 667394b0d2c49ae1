#![deny(missing_docs)]

//! # Parser Module
//!
//! Splits Prisma schema text into model blocks and field declarations.

pub mod extractors;
pub mod models;

pub use extractors::{extract_field_declarations, extract_model_blocks};
pub use models::{FieldDeclaration, ModelBlock};

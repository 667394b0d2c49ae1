//! # Extraction Logic
//!
//! Line-oriented regex matching over Prisma schema text.
//!
//! This is deliberately shallow: a model body ends at the first `}` (nested
//! braces are not supported) and only `name Type[?] @...` lines count as fields.

use crate::parser::models::{FieldDeclaration, ModelBlock};
use regex::Regex;
use std::sync::OnceLock;

fn model_block_re() -> &'static Regex {
    static MODEL_RE: OnceLock<Regex> = OnceLock::new();
    MODEL_RE.get_or_init(|| Regex::new(r"model\s+(\w+)\s+\{([^}]+)\}").expect("Invalid regex"))
}

fn field_line_re() -> &'static Regex {
    static FIELD_RE: OnceLock<Regex> = OnceLock::new();
    FIELD_RE.get_or_init(|| {
        Regex::new(r"(?:\A|\n)\s+(\w+)\s+(\w+)(\?)?\s+@").expect("Invalid regex")
    })
}

/// Extracts every `model Name { ... }` block, in source order.
///
/// Malformed input is not an error: anything that does not match simply
/// yields no block.
pub fn extract_model_blocks(schema: &str) -> Vec<ModelBlock> {
    let blocks: Vec<ModelBlock> = model_block_re()
        .captures_iter(schema)
        .map(|caps| ModelBlock::new(&caps[1], &caps[2]))
        .collect();

    tracing::debug!(count = blocks.len(), "extracted model blocks");
    blocks
}

/// Extracts the field declarations of a model body, in source order.
///
/// List relations (`questions Question[]`) and block attributes (`@@map(...)`)
/// are skipped silently, as is an attribute-less `name Type` line unless the
/// next line starts with `@`: the whitespace before the marker may span the
/// newline, so `note String` followed by `@@map(...)` counts as a field.
pub fn extract_field_declarations(body: &str) -> Vec<FieldDeclaration> {
    field_line_re()
        .captures_iter(body)
        .map(|caps| FieldDeclaration::new(&caps[1], &caps[2], caps.get(3).is_some()))
        .collect()
}

//! # Data Models
//!
//! Intermediate Representation (IR) structures for parsed Prisma schema text.

/// A named, brace-delimited `model` section of a Prisma schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBlock {
    /// The identifier following the `model` keyword.
    pub name: String,
    /// The raw text between the braces, newlines included.
    pub body: String,
}

impl ModelBlock {
    /// Creates a block from a name and raw body text.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// A single field line parsed from a model body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// The field name (e.g. `deckId`).
    pub name: String,
    /// The declared Prisma type (e.g. `String`).
    pub ty: String,
    /// Whether the type carried the `?` marker.
    pub is_optional: bool,
}

impl FieldDeclaration {
    /// Creates a field declaration.
    pub fn new(name: impl Into<String>, ty: impl Into<String>, is_optional: bool) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_optional,
        }
    }
}

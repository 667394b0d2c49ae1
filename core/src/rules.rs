#![deny(missing_docs)]

//! # Generation Rules
//!
//! Hard-coded special cases expressed as small rule objects, so the generator
//! loop stays table-driven and each policy can be tested or swapped alone.

use crate::parser::{FieldDeclaration, ModelBlock};

/// A rule that may take over the mapping of a single field.
pub trait FieldRule {
    /// Returns the full declaration line if this rule handles `field`.
    fn apply(&self, field: &FieldDeclaration) -> Option<String>;

    /// Import lines the emitted declaration depends on.
    fn imports(&self) -> &[&'static str] {
        &[]
    }
}

/// A rule that may append a relation declaration to a generated class.
pub trait RelationRule {
    /// Returns the relation declaration line if it applies to `block`.
    fn relation_stub(&self, block: &ModelBlock) -> Option<String>;

    /// Import lines the emitted stub depends on.
    fn imports(&self) -> &[&'static str] {
        &[]
    }
}

/// Maps the identifier field to a UUID primary key, whatever its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyRule {
    /// Field name that triggers the rule.
    pub field_name: String,
}

impl Default for PrimaryKeyRule {
    fn default() -> Self {
        Self {
            field_name: "id".into(),
        }
    }
}

impl FieldRule for PrimaryKeyRule {
    fn apply(&self, field: &FieldDeclaration) -> Option<String> {
        (field.name == self.field_name).then(|| {
            format!(
                "{} = models.UUIDField(primary_key=True, default=uuid.uuid4, editable=False)",
                field.name
            )
        })
    }

    fn imports(&self) -> &[&'static str] {
        &["import uuid"]
    }
}

/// Emits a fixed declaration when the raw body contains a literal substring.
///
/// This does not look at relation attributes at all: `DeckardField` triggers
/// the `Deck` rule just like a real `deck Deck @relation(...)` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringRelationRule {
    /// Substring searched for in the model body.
    pub needle: String,
    /// Declaration line emitted on a match.
    pub declaration: String,
}

impl SubstringRelationRule {
    /// Creates a rule emitting `declaration` whenever `needle` is in the body.
    pub fn new(needle: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            declaration: declaration.into(),
        }
    }

    /// Foreign key to `Deck`, cascading on delete, reverse accessor `<class>s`.
    pub fn deck() -> Self {
        Self::new(
            "Deck",
            "deck = models.ForeignKey('Deck', on_delete=models.CASCADE, related_name='%(class)ss')",
        )
    }
}

impl RelationRule for SubstringRelationRule {
    fn relation_stub(&self, block: &ModelBlock) -> Option<String> {
        block
            .body
            .contains(self.needle.as_str())
            .then(|| self.declaration.clone())
    }
}

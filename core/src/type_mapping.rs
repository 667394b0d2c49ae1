#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts Prisma field declarations into Django model field declarations.
//! The declared type is looked up in an injected [`TypeMappingTable`]; unknown
//! types fall back to the table default and never fail.

use crate::error::{AppError, AppResult};
use crate::parser::FieldDeclaration;
use crate::rules::{FieldRule, PrimaryKeyRule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Arguments appended to optional fields.
pub const NULLABLE_ARGS: &str = "blank=True, null=True";

/// A Django field constructor, e.g. `CharField(max_length=255)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldConstructor {
    /// Constructor name under `models.` (e.g. `CharField`).
    pub name: String,
    /// Raw base arguments without parentheses (may be empty).
    pub args: String,
}

impl FieldConstructor {
    /// Creates a constructor from a name and raw arguments.
    pub fn new(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }

    /// Renders the call with optional extra arguments appended after the base ones.
    pub fn call(&self, extra: Option<&str>) -> String {
        let args = match (self.args.is_empty(), extra) {
            (_, None) => self.args.clone(),
            (true, Some(extra)) => extra.to_string(),
            (false, Some(extra)) => format!("{}, {}", self.args, extra),
        };
        format!("models.{}({})", self.name, args)
    }
}

impl Display for FieldConstructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.args)
    }
}

impl FromStr for FieldConstructor {
    type Err = AppError;

    /// Parses `Name`, `Name()` or `Name(args)`; an optional `models.` prefix is dropped.
    fn from_str(s: &str) -> AppResult<Self> {
        let expr = s.trim();
        let expr = expr.strip_prefix("models.").unwrap_or(expr);

        let (name, args) = match expr.find('(') {
            Some(open) => {
                let inner = expr[open + 1..].strip_suffix(')').ok_or_else(|| {
                    AppError::Config(format!("Unclosed constructor expression: {}", s))
                })?;
                if !args_balanced(inner) {
                    return Err(AppError::Config(format!(
                        "Unbalanced parentheses in constructor expression: {}",
                        s
                    )));
                }
                (&expr[..open], inner.trim())
            }
            None => (expr, ""),
        };

        let valid_name = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(AppError::Config(format!(
                "Invalid constructor name in expression: {}",
                s
            )));
        }

        Ok(FieldConstructor::new(name, args))
    }
}

/// True if every `(`/`)` in `args` pairs up without closing the outer call.
/// Parentheses inside quoted strings are ignored.
fn args_balanced(args: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in args.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            (None, _) => {}
        }
    }

    depth == 0 && quote.is_none()
}

impl TryFrom<String> for FieldConstructor {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        value.parse()
    }
}

impl From<FieldConstructor> for String {
    fn from(value: FieldConstructor) -> Self {
        value.to_string()
    }
}

/// Lookup from declared Prisma type to Django field constructor, with a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMappingTable {
    /// Explicit mappings, in declaration order.
    pub types: IndexMap<String, FieldConstructor>,
    /// Constructor used for any type without an entry.
    pub default: FieldConstructor,
}

impl Default for TypeMappingTable {
    fn default() -> Self {
        let mut types = IndexMap::new();
        types.insert("String".into(), FieldConstructor::new("CharField", "max_length=255"));
        types.insert("Int".into(), FieldConstructor::new("IntegerField", ""));
        types.insert("Boolean".into(), FieldConstructor::new("BooleanField", ""));

        Self {
            types,
            default: FieldConstructor::new("TextField", ""),
        }
    }
}

impl TypeMappingTable {
    /// A table with no entries; every type maps to `default`.
    pub fn empty(default: FieldConstructor) -> Self {
        Self {
            types: IndexMap::new(),
            default,
        }
    }

    /// Adds or replaces the entry for `ty`.
    pub fn insert(&mut self, ty: impl Into<String>, ctor: FieldConstructor) {
        self.types.insert(ty.into(), ctor);
    }

    /// Returns true if `ty` has an explicit entry.
    pub fn is_mapped(&self, ty: &str) -> bool {
        self.types.contains_key(ty)
    }

    /// Returns the constructor for `ty`, or the default.
    pub fn lookup(&self, ty: &str) -> &FieldConstructor {
        self.types.get(ty).unwrap_or(&self.default)
    }
}

/// Trait for converting a parsed field into a target field declaration line.
pub trait FieldMapper {
    /// Maps one field to a declaration such as `title = models.CharField(...)`.
    fn map_field(&self, field: &FieldDeclaration) -> String;

    /// Import lines the declaration for `field` depends on, beyond `models`.
    fn field_imports(&self, field: &FieldDeclaration) -> Vec<&'static str> {
        let _ = field;
        Vec::new()
    }
}

/// Maps fields to Django `models.*` declarations.
///
/// Field rules are consulted in order before the table; the first rule that
/// answers wins.
pub struct DjangoFieldMapper {
    table: TypeMappingTable,
    rules: Vec<Box<dyn FieldRule>>,
}

impl DjangoFieldMapper {
    /// Creates a mapper with the standard `id` primary key rule.
    pub fn new(table: TypeMappingTable) -> Self {
        Self::with_rules(table, vec![Box::new(PrimaryKeyRule::default())])
    }

    /// Creates a mapper with an explicit rule list.
    pub fn with_rules(table: TypeMappingTable, rules: Vec<Box<dyn FieldRule>>) -> Self {
        Self { table, rules }
    }

    /// The injected type table.
    pub fn table(&self) -> &TypeMappingTable {
        &self.table
    }
}

impl Default for DjangoFieldMapper {
    fn default() -> Self {
        Self::new(TypeMappingTable::default())
    }
}

impl FieldMapper for DjangoFieldMapper {
    fn map_field(&self, field: &FieldDeclaration) -> String {
        if let Some(line) = self.rules.iter().find_map(|rule| rule.apply(field)) {
            return line;
        }

        if !self.table.is_mapped(&field.ty) {
            tracing::warn!(
                field = %field.name,
                ty = %field.ty,
                fallback = %self.table.default,
                "unmapped type, using default field"
            );
        }

        let ctor = self.table.lookup(&field.ty);
        let extra = field.is_optional.then_some(NULLABLE_ARGS);
        format!("{} = {}", field.name, ctor.call(extra))
    }

    fn field_imports(&self, field: &FieldDeclaration) -> Vec<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.apply(field).is_some())
            .map(|rule| rule.imports().to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: &str, optional: bool) -> FieldDeclaration {
        FieldDeclaration::new(name, ty, optional)
    }

    #[test]
    fn test_mapped_types() {
        let mapper = DjangoFieldMapper::default();

        let cases = vec![
            ("String", "title = models.CharField(max_length=255)"),
            ("Int", "title = models.IntegerField()"),
            ("Boolean", "title = models.BooleanField()"),
        ];

        for (ty, expected) in cases {
            assert_eq!(mapper.map_field(&field("title", ty, false)), expected);
        }
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let mapper = DjangoFieldMapper::default();
        assert_eq!(
            mapper.map_field(&field("createdAt", "DateTime", false)),
            "createdAt = models.TextField()"
        );
        assert_eq!(
            mapper.map_field(&field("deck", "Deck", true)),
            "deck = models.TextField(blank=True, null=True)"
        );
    }

    #[test]
    fn test_optional_appends_nullability() {
        let mapper = DjangoFieldMapper::default();
        assert_eq!(
            mapper.map_field(&field("text", "String", true)),
            "text = models.CharField(max_length=255, blank=True, null=True)"
        );
        assert_eq!(
            mapper.map_field(&field("spaces", "Int", true)),
            "spaces = models.IntegerField(blank=True, null=True)"
        );
        assert!(!mapper
            .map_field(&field("spaces", "Int", false))
            .contains("null=True"));
    }

    #[test]
    fn test_id_ignores_type_and_optionality() {
        let mapper = DjangoFieldMapper::default();
        let expected = "id = models.UUIDField(primary_key=True, default=uuid.uuid4, editable=False)";
        for (ty, optional) in [("String", false), ("Int", true), ("Whatever", false)] {
            assert_eq!(mapper.map_field(&field("id", ty, optional)), expected);
        }
    }

    #[test]
    fn test_field_imports_follow_rules() {
        let mapper = DjangoFieldMapper::default();
        assert_eq!(mapper.field_imports(&field("id", "String", false)), vec!["import uuid"]);
        assert!(mapper.field_imports(&field("title", "String", true)).is_empty());

        let bare = DjangoFieldMapper::with_rules(TypeMappingTable::default(), Vec::new());
        assert!(bare.field_imports(&field("id", "String", false)).is_empty());
    }

    #[test]
    fn test_injected_table() {
        let mut table = TypeMappingTable::empty(FieldConstructor::new("JSONField", ""));
        table.insert("String", FieldConstructor::new("CharField", "max_length=64"));
        let mapper = DjangoFieldMapper::with_rules(table, Vec::new());

        assert_eq!(
            mapper.map_field(&field("id", "String", false)),
            "id = models.CharField(max_length=64)"
        );
        assert_eq!(
            mapper.map_field(&field("flag", "Boolean", false)),
            "flag = models.JSONField()"
        );
    }

    #[test]
    fn test_constructor_parsing() {
        let ctor: FieldConstructor = "CharField(max_length=255)".parse().unwrap();
        assert_eq!(ctor, FieldConstructor::new("CharField", "max_length=255"));

        let bare: FieldConstructor = "models.TextField".parse().unwrap();
        assert_eq!(bare, FieldConstructor::new("TextField", ""));
        assert_eq!(bare.to_string(), "TextField()");

        assert!(matches!(
            "CharField(max_length=1".parse::<FieldConstructor>(),
            Err(AppError::Config(_))
        ));
        assert!("(x)".parse::<FieldConstructor>().is_err());

        for bad in ["CharField(max_length=1))", "FloatField(a)(b)", "CharField(default=f(x)"] {
            assert!(
                matches!(bad.parse::<FieldConstructor>(), Err(AppError::Config(_))),
                "{bad} should be rejected"
            );
        }

        let nested: FieldConstructor = "CharField(choices=[(1, 'a)')], default=str(1))".parse().unwrap();
        assert_eq!(nested.args, "choices=[(1, 'a)')], default=str(1)");
        assert!("Char Field()".parse::<FieldConstructor>().is_err());
    }
}

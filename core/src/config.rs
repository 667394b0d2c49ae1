#![deny(missing_docs)]

//! # Type Table Configuration
//!
//! Loads overrides for the [`TypeMappingTable`] from JSON or YAML files.
//!
//! ```yaml
//! replace: false
//! default: TextField
//! types:
//!   DateTime: DateTimeField(auto_now_add=True)
//!   Float: FloatField
//! ```

use crate::error::{AppError, AppResult};
use crate::type_mapping::{FieldConstructor, TypeMappingTable};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File-level description of type mapping overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    /// Declared type to constructor expression, e.g. `Float: FloatField()`.
    #[serde(default)]
    pub types: IndexMap<String, FieldConstructor>,
    /// Replacement for the default constructor.
    #[serde(default)]
    pub default: Option<FieldConstructor>,
    /// Start from an empty table instead of the built-in one.
    #[serde(default)]
    pub replace: bool,
}

impl MappingConfig {
    /// Parses a JSON document.
    pub fn from_json(content: &str) -> AppResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| AppError::Config(format!("Invalid JSON mapping config: {}", e)))
    }

    /// Parses a YAML document.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("Invalid YAML mapping config: {}", e)))
    }

    /// Loads a config file, choosing the format by extension
    /// (`.yaml`/`.yml` are YAML, anything else JSON).
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read mapping config {:?}: {}", path, e))
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        match ext {
            "yaml" | "yml" => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Builds the effective table: built-in entries (unless `replace`) with
    /// this config's entries laid over them.
    pub fn into_table(self) -> TypeMappingTable {
        let base = TypeMappingTable::default();
        let mut table = if self.replace {
            TypeMappingTable::empty(base.default)
        } else {
            base
        };

        for (ty, ctor) in self.types {
            table.insert(ty, ctor);
        }
        if let Some(default) = self.default {
            table.default = default;
        }
        table
    }
}

/// Parses a `TYPE=EXPR` override such as `Float=FloatField()`.
pub fn parse_type_override(s: &str) -> AppResult<(String, FieldConstructor)> {
    let (ty, expr) = s
        .split_once('=')
        .ok_or_else(|| AppError::Config(format!("invalid TYPE=EXPR: no `=` found in `{}`", s)))?;

    let ty = ty.trim();
    if ty.is_empty() {
        return Err(AppError::Config(format!("missing type name in `{}`", s)));
    }
    Ok((ty.to_string(), expr.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_overlay_keeps_builtins() {
        let config = MappingConfig::from_json(
            r#"{ "types": { "Float": "FloatField()", "String": "CharField(max_length=100)" } }"#,
        )
        .unwrap();
        let table = config.into_table();

        assert_eq!(table.lookup("Float"), &FieldConstructor::new("FloatField", ""));
        assert_eq!(
            table.lookup("String"),
            &FieldConstructor::new("CharField", "max_length=100")
        );
        assert_eq!(table.lookup("Int"), &FieldConstructor::new("IntegerField", ""));
        assert_eq!(table.lookup("Json"), &FieldConstructor::new("TextField", ""));
        let order: Vec<&str> = table.types.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["String", "Int", "Boolean", "Float"]);
    }

    #[test]
    fn test_replace_and_default_from_yaml() {
        let config = MappingConfig::from_yaml(
            "replace: true\ndefault: JSONField\ntypes:\n  Int: BigIntegerField\n",
        )
        .unwrap();
        let table = config.into_table();

        assert!(!table.is_mapped("String"));
        assert_eq!(table.lookup("String"), &FieldConstructor::new("JSONField", ""));
        assert_eq!(table.lookup("Int"), &FieldConstructor::new("BigIntegerField", ""));
    }

    #[test]
    fn test_invalid_expression_is_config_error() {
        let err = MappingConfig::from_json(r#"{ "types": { "Int": "IntegerField(" } }"#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        for expr in ["IntegerField(x))", "FloatField(a)(b)"] {
            let json = format!(r#"{{ "types": {{ "Int": "{expr}" }} }}"#);
            let err = MappingConfig::from_json(&json).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{expr} should be rejected");
        }

        let err = MappingConfig::from_json(r#"{ "typez": {} }"#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.yml");
        fs::File::create(&path)
            .unwrap()
            .write_all(b"types:\n  DateTime: DateTimeField(auto_now_add=True)\n")
            .unwrap();

        let table = MappingConfig::load(&path).unwrap().into_table();
        assert_eq!(
            table.lookup("DateTime"),
            &FieldConstructor::new("DateTimeField", "auto_now_add=True")
        );

        let missing = MappingConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(AppError::Config(_))));
    }

    #[test]
    fn test_parse_type_override() {
        let (ty, ctor) = parse_type_override("Float=FloatField(default=0.0)").unwrap();
        assert_eq!(ty, "Float");
        assert_eq!(ctor, FieldConstructor::new("FloatField", "default=0.0"));

        assert!(parse_type_override("Float").is_err());
        assert!(matches!(
            parse_type_override("Float=FloatField(a)(b)"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            parse_type_override("String=CharField(max_length=1))"),
            Err(AppError::Config(_))
        ));
        assert!(parse_type_override("=FloatField").is_err());
    }
}

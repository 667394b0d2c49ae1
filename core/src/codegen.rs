#![deny(missing_docs)]

//! # Code Generation
//!
//! Turns extracted model blocks into Django model class source.
//!
//! - [`ModelGenerator`] renders one class: header, mapped fields, relation
//!   stubs and the `Meta` block with the derived table name.
//! - [`SchemaConverter`] runs extraction over a whole schema and joins the
//!   classes in source order.

use crate::parser::{extract_field_declarations, extract_model_blocks, ModelBlock};
use crate::rules::{RelationRule, SubstringRelationRule};
use crate::type_mapping::{DjangoFieldMapper, FieldMapper, TypeMappingTable};
use std::collections::BTreeSet;

const INDENT: &str = "    ";

/// Derives the storage table name: lower-cased model name plus `s`.
pub fn table_name(model_name: &str) -> String {
    format!("{}s", model_name.to_lowercase())
}

/// Generates a single Django model class from a [`ModelBlock`].
pub struct ModelGenerator<M: FieldMapper = DjangoFieldMapper> {
    mapper: M,
    relations: Vec<Box<dyn RelationRule>>,
}

impl<M: FieldMapper> ModelGenerator<M> {
    /// Creates a generator with the standard `Deck` relation rule.
    pub fn new(mapper: M) -> Self {
        Self::with_relations(mapper, vec![Box::new(SubstringRelationRule::deck())])
    }

    /// Creates a generator with an explicit relation rule list.
    pub fn with_relations(mapper: M, relations: Vec<Box<dyn RelationRule>>) -> Self {
        Self { mapper, relations }
    }

    /// The field mapper in use.
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Renders the class for `block`. Never fails; a body without field lines
    /// yields a class with only the `Meta` block.
    pub fn generate(&self, block: &ModelBlock) -> String {
        let mut code = format!("class {}(models.Model):\n", block.name);

        let fields = extract_field_declarations(&block.body);
        tracing::debug!(model = %block.name, fields = fields.len(), "generating model class");

        for field in &fields {
            code.push_str(INDENT);
            code.push_str(&self.mapper.map_field(field));
            code.push('\n');
        }

        for stub in self.relations.iter().filter_map(|rule| rule.relation_stub(block)) {
            code.push_str(INDENT);
            code.push_str(&stub);
            code.push('\n');
        }

        code.push_str(&format!("\n{INDENT}class Meta:\n"));
        code.push_str(&format!(
            "{INDENT}{INDENT}db_table = '{}'\n",
            table_name(&block.name)
        ));
        code
    }

    /// Adds the import lines the class for `block` needs to `imports`.
    pub fn collect_imports(&self, block: &ModelBlock, imports: &mut BTreeSet<&'static str>) {
        imports.insert("from django.db import models");

        for field in extract_field_declarations(&block.body) {
            imports.extend(self.mapper.field_imports(&field));
        }

        for rule in &self.relations {
            if rule.relation_stub(block).is_some() {
                imports.extend(rule.imports().iter().copied());
            }
        }
    }
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self::new(DjangoFieldMapper::default())
    }
}

/// Converts a whole Prisma schema into Django model source.
pub struct SchemaConverter<M: FieldMapper = DjangoFieldMapper> {
    generator: ModelGenerator<M>,
}

impl<M: FieldMapper> SchemaConverter<M> {
    /// Wraps a configured generator.
    pub fn new(generator: ModelGenerator<M>) -> Self {
        Self { generator }
    }

    /// The underlying generator.
    pub fn generator(&self) -> &ModelGenerator<M> {
        &self.generator
    }

    /// Generated classes in source order, separated by a blank line.
    /// A schema without model blocks yields an empty string.
    pub fn convert(&self, schema: &str) -> String {
        self.generate_classes(schema).join("\n\n")
    }

    /// Like [`convert`](Self::convert), prefixed with the import lines the
    /// classes need so the result is a complete Python module.
    pub fn convert_module(&self, schema: &str) -> String {
        let blocks = extract_model_blocks(schema);
        if blocks.is_empty() {
            return String::new();
        }

        let mut imports = BTreeSet::new();
        let mut classes = Vec::with_capacity(blocks.len());
        for block in &blocks {
            self.generator.collect_imports(block, &mut imports);
            classes.push(self.generator.generate(block));
        }

        let mut code = String::new();
        for import in imports {
            code.push_str(import);
            code.push('\n');
        }
        code.push_str("\n\n");
        code.push_str(&classes.join("\n\n"));
        code
    }

    fn generate_classes(&self, schema: &str) -> Vec<String> {
        extract_model_blocks(schema)
            .iter()
            .map(|block| self.generator.generate(block))
            .collect()
    }
}

impl SchemaConverter {
    /// A converter using the given type table and the standard rules.
    pub fn with_table(table: TypeMappingTable) -> Self {
        Self::new(ModelGenerator::new(DjangoFieldMapper::new(table)))
    }
}

impl Default for SchemaConverter {
    fn default() -> Self {
        Self::new(<ModelGenerator>::default())
    }
}

/// Converts `schema` with the built-in type table and rules.
pub fn convert_schema(schema: &str) -> String {
    <SchemaConverter>::default().convert(schema)
}

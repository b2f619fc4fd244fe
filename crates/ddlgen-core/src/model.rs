//! ER model consumed by the emitter.
//!
//! Cross-entity links (`reference_to`, relationship targets) are name
//! handles resolved through [`crate::resolve::ModelIndex`], never owning
//! pointers, so mutually referencing entities need no shared ownership.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Any node a host may hand to the generator.
///
/// Only [`ModelElement::DataModel`] produces output; every other kind is a
/// no-op so generation can be driven uniformly over a mixed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelElement {
    DataModel(DataModel),
    Entity(Entity),
    Column(Column),
    RelationshipEnd(RelationshipEnd),
    Other {
        #[serde(default)]
        name: String,
    },
}

impl ModelElement {
    /// Short kind label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelElement::DataModel(_) => "data_model",
            ModelElement::Entity(_) => "entity",
            ModelElement::Column(_) => "column",
            ModelElement::RelationshipEnd(_) => "relationship_end",
            ModelElement::Other { .. } => "other",
        }
    }

    /// Display name of the element when it carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            ModelElement::DataModel(model) => Some(&model.name),
            ModelElement::Entity(entity) => Some(&entity.name),
            ModelElement::Column(column) => Some(&column.name),
            ModelElement::RelationshipEnd(_) => None,
            ModelElement::Other { name } => Some(name),
        }
    }
}

/// An ordered collection of entities; order drives output order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DataModel {
    pub name: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// A modeled table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Association ends this entity owns toward other entities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship_ends: Vec<RelationshipEnd>,
}

impl Entity {
    /// Columns flagged as primary key, in column order.
    pub fn primary_keys(&self) -> Vec<&Column> {
        self.columns.iter().filter(|col| col.primary_key).collect()
    }

    /// Columns flagged as foreign key, in column order.
    pub fn foreign_keys(&self) -> Vec<&Column> {
        self.columns.iter().filter(|col| col.foreign_key).collect()
    }

    /// Columns flagged as unique, in column order.
    pub fn uniques(&self) -> Vec<&Column> {
        self.columns.iter().filter(|col| col.unique).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }
}

/// Column metadata for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub name: String,
    /// Declared type name (e.g. `VARCHAR`); blank means the default type.
    #[serde(default)]
    pub data_type: String,
    /// Optional length or precision, rendered as `TYPE(length)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub foreign_key: bool,
    /// Target column when `foreign_key` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<ColumnRef>,
}

fn default_nullable() -> bool {
    true
}

impl Column {
    /// A nullable column of the given type with no key flags.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            length: None,
            primary_key: false,
            unique: false,
            nullable: true,
            foreign_key: false,
            reference_to: None,
        }
    }

    /// Declared type string including the length suffix, if any.
    ///
    /// A length without a type name is dropped, so a blank type stays blank.
    pub fn type_string(&self) -> String {
        if self.data_type.trim().is_empty() {
            return self.data_type.clone();
        }
        match self.length.as_deref().map(str::trim) {
            Some(length) if !length.is_empty() => format!("{}({})", self.data_type, length),
            _ => self.data_type.clone(),
        }
    }
}

/// Lookup handle for a column in another entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct ColumnRef {
    pub entity: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(entity: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            column: column.into(),
        }
    }

    /// True when this handle names `column` of `entity`.
    pub fn points_to(&self, entity: &Entity, column: &Column) -> bool {
        self.entity == entity.name && self.column == column.name
    }
}

/// An association end owned by an entity, pointing at another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RelationshipEnd {
    /// Cardinality tag, e.g. `1`, `0..1`, `0..*`.
    pub cardinality: String,
    /// Name of the target entity.
    pub reference: String,
}

impl RelationshipEnd {
    pub fn new(cardinality: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            cardinality: cardinality.into(),
            reference: reference.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_string_appends_length() {
        let mut column = Column::new("name", "VARCHAR");
        column.length = Some("255".to_string());
        assert_eq!(column.type_string(), "VARCHAR(255)");

        column.length = Some("  ".to_string());
        assert_eq!(column.type_string(), "VARCHAR");
    }

    #[test]
    fn length_without_type_name_is_dropped() {
        let mut column = Column::new("n", "");
        column.length = Some("10".to_string());
        assert_eq!(column.type_string(), "");
    }

    #[test]
    fn column_defaults_to_nullable_when_deserialized() {
        let column: Column = serde_json::from_str(r#"{"name": "note"}"#).expect("parse column");
        assert!(column.nullable);
        assert!(!column.primary_key);
        assert!(column.data_type.is_empty());
    }

    #[test]
    fn element_kind_tag_round_trips() {
        let json = r#"{"kind": "other", "name": "Diagram"}"#;
        let element: ModelElement = serde_json::from_str(json).expect("parse element");
        assert_eq!(element.kind(), "other");
        assert_eq!(element.name(), Some("Diagram"));
    }
}

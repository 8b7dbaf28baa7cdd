//! Admin-panel field descriptors produced by the transformer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field descriptors keyed by field or column name
pub type FieldMap = IndexMap<String, FieldDescriptor>;

/// Widget category for a scalar field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiType {
    Number,
    String,
    Text,
    Boolean,
    Date,
}

impl fmt::Display for UiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UiType::Number => "number",
            UiType::String => "string",
            UiType::Text => "text",
            UiType::Boolean => "boolean",
            UiType::Date => "date",
        };
        f.write_str(s)
    }
}

/// Entity on the other end of a relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub name: String,
    pub class: String,
}

/// Plain column shown with a widget of its UI type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarField {
    pub name: String,
    pub class: String,
    #[serde(rename = "type")]
    pub ui_type: UiType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationField {
    pub name: String,
    pub referenced_entity: EntityRef,
    pub referenced_field: String,
}

/// One entry of an entity's admin configuration.
///
/// Relations serialize with their kind under `type`
/// (`reference`, `reference_many`, `referenced_list`); scalars carry
/// their [`UiType`] under the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDescriptor {
    /// Single-valued foreign key held by this entity
    Reference(RelationField),
    /// Many-valued relationship held by this entity through a join table
    ReferenceMany(RelationField),
    /// Many-valued relationship held by the other entity
    ReferencedList(RelationField),
    #[serde(untagged)]
    Scalar(ScalarField),
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        match self {
            FieldDescriptor::Scalar(field) => &field.name,
            FieldDescriptor::Reference(rel)
            | FieldDescriptor::ReferenceMany(rel)
            | FieldDescriptor::ReferencedList(rel) => &rel.name,
        }
    }

    /// Value of the serialized `type` key
    pub fn type_name(&self) -> String {
        match self {
            FieldDescriptor::Scalar(field) => field.ui_type.to_string(),
            FieldDescriptor::Reference(_) => "reference".to_string(),
            FieldDescriptor::ReferenceMany(_) => "reference_many".to_string(),
            FieldDescriptor::ReferencedList(_) => "referenced_list".to_string(),
        }
    }

    pub fn is_relation(&self) -> bool {
        !matches!(self, FieldDescriptor::Scalar(_))
    }

    pub fn relation(&self) -> Option<&RelationField> {
        match self {
            FieldDescriptor::Scalar(_) => None,
            FieldDescriptor::Reference(rel)
            | FieldDescriptor::ReferenceMany(rel)
            | FieldDescriptor::ReferencedList(rel) => Some(rel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn author_reference() -> FieldDescriptor {
        FieldDescriptor::Reference(RelationField {
            name: "author_id".to_string(),
            referenced_entity: EntityRef {
                name: "author".to_string(),
                class: "App\\Entity\\Author".to_string(),
            },
            referenced_field: "id".to_string(),
        })
    }

    #[test]
    fn test_scalar_serialization() {
        let field = FieldDescriptor::Scalar(ScalarField {
            name: "name".to_string(),
            class: "App\\Entity\\User".to_string(),
            ui_type: UiType::String,
        });

        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({"name": "name", "class": "App\\Entity\\User", "type": "string"})
        );
    }

    #[test]
    fn test_relation_serialization() {
        assert_eq!(
            serde_json::to_value(author_reference()).unwrap(),
            json!({
                "type": "reference",
                "name": "author_id",
                "referencedEntity": {"name": "author", "class": "App\\Entity\\Author"},
                "referencedField": "id"
            })
        );
    }

    #[test]
    fn test_deserialize_tells_scalars_from_relations() {
        let scalar: FieldDescriptor = serde_json::from_value(json!({
            "name": "body", "class": "App\\Entity\\Post", "type": "text"
        }))
        .unwrap();
        assert!(matches!(scalar, FieldDescriptor::Scalar(ref f) if f.ui_type == UiType::Text));

        let list: FieldDescriptor = serde_json::from_value(json!({
            "type": "referenced_list",
            "name": "posts",
            "referencedEntity": {"name": "post", "class": "App\\Entity\\Post"},
            "referencedField": "author_id"
        }))
        .unwrap();
        assert!(matches!(list, FieldDescriptor::ReferencedList(_)));
    }

    #[test]
    fn test_accessors() {
        let field = author_reference();
        assert_eq!(field.name(), "author_id");
        assert_eq!(field.type_name(), "reference");
        assert!(field.is_relation());
        assert_eq!(field.relation().unwrap().referenced_field, "id");
    }
}

//! Entity mapping metadata as reflected by the ORM.
//!
//! These types mirror the structure of a reflected entity document (field
//! mappings plus association mappings) and are consumed by the transformer.
//! Keys follow the camelCase naming of the upstream reflection dump.

use crate::descriptor::UiType;
use crate::transformer::TransformError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metadata for a single mapped entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// Fully-qualified class name (e.g. `App\Entity\User`)
    pub name: String,
    #[serde(default)]
    pub field_mappings: Vec<FieldMapping>,
    /// Associations keyed by the associated property name
    #[serde(default)]
    pub association_mappings: IndexMap<String, AssociationMapping>,
}

/// Scalar column mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub field_name: String,
    /// Persistence type name, kept raw so newer upstream types stay representable
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FieldMapping {
    pub fn new(field_name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_type: field_type.into(),
        }
    }
}

/// Relationship mapping for one associated property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationMapping {
    pub field_name: String,
    pub target_entity: String,
    #[serde(default)]
    pub is_owning_side: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_columns: Option<Vec<JoinColumn>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_table: Option<JoinTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_by: Option<String>,
}

/// Foreign key column held by the owning side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinColumn {
    pub name: String,
    pub referenced_column_name: String,
}

/// Associative table of a many-to-many relationship
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTable {
    #[serde(default)]
    pub inverse_join_columns: Vec<InverseJoinColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InverseJoinColumn {
    pub referenced_column_name: String,
}

/// Column types understood by the transformer.
///
/// See the DBAL type reference; the string forms are the ones used in
/// reflected field mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceType {
    SmallInt,
    Integer,
    BigInt,
    Decimal,
    Float,
    String,
    Guid,
    DateTime,
    #[serde(rename = "datetimetz", alias = "datetimez")]
    DateTimeTz,
    Time,
    Text,
    Boolean,
    Date,
}

impl PersistenceType {
    pub const ALL: [PersistenceType; 13] = [
        PersistenceType::SmallInt,
        PersistenceType::Integer,
        PersistenceType::BigInt,
        PersistenceType::Decimal,
        PersistenceType::Float,
        PersistenceType::String,
        PersistenceType::Guid,
        PersistenceType::DateTime,
        PersistenceType::DateTimeTz,
        PersistenceType::Time,
        PersistenceType::Text,
        PersistenceType::Boolean,
        PersistenceType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersistenceType::SmallInt => "smallint",
            PersistenceType::Integer => "integer",
            PersistenceType::BigInt => "bigint",
            PersistenceType::Decimal => "decimal",
            PersistenceType::Float => "float",
            PersistenceType::String => "string",
            PersistenceType::Guid => "guid",
            PersistenceType::DateTime => "datetime",
            PersistenceType::DateTimeTz => "datetimetz",
            PersistenceType::Time => "time",
            PersistenceType::Text => "text",
            PersistenceType::Boolean => "boolean",
            PersistenceType::Date => "date",
        }
    }

    /// Widget category used by the admin panel for this column type
    pub fn ui_type(&self) -> UiType {
        match self {
            PersistenceType::SmallInt
            | PersistenceType::Integer
            | PersistenceType::BigInt
            | PersistenceType::Decimal
            | PersistenceType::Float => UiType::Number,
            PersistenceType::String
            | PersistenceType::Guid
            | PersistenceType::DateTime
            | PersistenceType::DateTimeTz
            | PersistenceType::Time => UiType::String,
            PersistenceType::Text => UiType::Text,
            PersistenceType::Boolean => UiType::Boolean,
            PersistenceType::Date => UiType::Date,
        }
    }
}

impl fmt::Display for PersistenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersistenceType {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older mappings spell the timezone-aware type without the second 't'
        if s == "datetimez" {
            return Ok(PersistenceType::DateTimeTz);
        }

        PersistenceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TransformError::UnsupportedType {
                field: None,
                type_name: s.to_string(),
            })
    }
}

//! Metadata to admin configuration transformer.
//!
//! Turns the mapping metadata of one entity into a flat map of field
//! descriptors. Scalar columns become typed widgets, owning-side associations
//! become references and inverse-side associations become referenced lists.

use crate::descriptor::{EntityRef, FieldDescriptor, FieldMap, RelationField, ScalarField};
use crate::inflector::entity_name;
use crate::metadata::{EntityMetadata, PersistenceType};
use std::collections::HashSet;
use std::fmt;

/// Error type for transform operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Column type missing from the type table
    UnsupportedType {
        field: Option<String>,
        type_name: String,
    },
    /// Admin configuration cannot be turned back into mapping metadata
    UnsupportedDirection,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::UnsupportedType { field: Some(field), type_name } => {
                write!(f, "Unsupported type '{}' for field '{}'", type_name, field)
            }
            TransformError::UnsupportedType { field: None, type_name } => {
                write!(f, "Unsupported type '{}'", type_name)
            }
            TransformError::UnsupportedDirection => write!(
                f,
                "An admin configuration cannot be transformed back into entity mapping metadata"
            ),
        }
    }
}

impl std::error::Error for TransformError {}

/// Two-way conversion contract between a source model and a target model.
///
/// Implementations that only support one direction return
/// [`TransformError::UnsupportedDirection`] from the other.
pub trait Transformer {
    type Source;
    type Target;

    fn transform(&self, source: &Self::Source) -> Result<Self::Target, TransformError>;

    fn reverse_transform(&self, target: &Self::Target) -> Result<Self::Source, TransformError>;
}

/// Converts [`EntityMetadata`] into a [`FieldMap`].
///
/// Stateless: every call builds its output from scratch and never touches
/// the input, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataTransformer;

impl MetadataTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for MetadataTransformer {
    type Source = EntityMetadata;
    type Target = FieldMap;

    fn transform(&self, metadata: &EntityMetadata) -> Result<FieldMap, TransformError> {
        let join_columns = join_columns(metadata);

        // Relationship descriptors replace any scalar mapping of the same name
        let relationship_names: HashSet<&str> = join_columns.keys().map(String::as_str).collect();

        let mut fields = FieldMap::new();
        for mapping in &metadata.field_mappings {
            if relationship_names.contains(mapping.field_name.as_str()) {
                tracing::trace!(
                    "Skipping field '{}' of {}: mapped as a relationship",
                    mapping.field_name,
                    metadata.name
                );
                continue;
            }

            let persistence_type: PersistenceType = mapping.field_type.parse().map_err(|_| {
                TransformError::UnsupportedType {
                    field: Some(mapping.field_name.clone()),
                    type_name: mapping.field_type.clone(),
                }
            })?;

            fields.insert(
                mapping.field_name.clone(),
                FieldDescriptor::Scalar(ScalarField {
                    name: mapping.field_name.clone(),
                    class: metadata.name.clone(),
                    ui_type: persistence_type.ui_type(),
                }),
            );
        }

        fields.extend(join_columns);
        fields.extend(inversed_relationships(metadata));

        tracing::debug!("Transformed {} into {} fields", metadata.name, fields.len());

        Ok(fields)
    }

    fn reverse_transform(&self, _configuration: &FieldMap) -> Result<EntityMetadata, TransformError> {
        Err(TransformError::UnsupportedDirection)
    }
}

/// Descriptors for the associations this entity owns.
///
/// A join column yields a reference keyed by the column name. A join table
/// yields a reference list keyed by the association's field name. An
/// association carrying both shapes yields both entries. Only the first
/// column of a composite key is considered.
pub fn join_columns(metadata: &EntityMetadata) -> FieldMap {
    let mut fields = FieldMap::new();

    for (property, mapping) in &metadata.association_mappings {
        if !mapping.is_owning_side {
            continue;
        }

        if let Some(column) = mapping.join_columns.as_ref().and_then(|columns| columns.first()) {
            fields.insert(
                column.name.clone(),
                FieldDescriptor::Reference(RelationField {
                    name: column.name.clone(),
                    referenced_entity: EntityRef {
                        name: property.clone(),
                        class: mapping.target_entity.clone(),
                    },
                    referenced_field: column.referenced_column_name.clone(),
                }),
            );
        }

        if let Some(column) = mapping
            .join_table
            .as_ref()
            .and_then(|table| table.inverse_join_columns.first())
        {
            fields.insert(
                mapping.field_name.clone(),
                FieldDescriptor::ReferenceMany(RelationField {
                    name: mapping.field_name.clone(),
                    referenced_entity: EntityRef {
                        name: entity_name(&mapping.target_entity),
                        class: mapping.target_entity.clone(),
                    },
                    referenced_field: column.referenced_column_name.clone(),
                }),
            );
        }
    }

    fields
}

/// Descriptors for associations owned by the other entity.
///
/// The referenced field assumes the owning side names its foreign key
/// `<mappedBy>_id`; other column names are not detected.
pub fn inversed_relationships(metadata: &EntityMetadata) -> FieldMap {
    metadata
        .association_mappings
        .iter()
        .filter(|(_, mapping)| !mapping.is_owning_side)
        .map(|(property, mapping)| {
            let descriptor = FieldDescriptor::ReferencedList(RelationField {
                name: property.clone(),
                referenced_entity: EntityRef {
                    name: entity_name(&mapping.target_entity),
                    class: mapping.target_entity.clone(),
                },
                referenced_field: format!("{}_id", mapping.mapped_by.as_deref().unwrap_or_default()),
            });
            (property.clone(), descriptor)
        })
        .collect()
}

//! # Admingen: ORM Metadata to Admin-Panel Configuration
//!
//! Admingen converts the mapping metadata of persistence-layer entities into
//! the field configuration consumed by an administration-panel generator.
//!
//! ## Features
//!
//! - **Typed widgets**: Column types map to `number`, `string`, `text`, `boolean` or `date`
//! - **References**: Owning-side join columns become `reference` fields
//! - **Reference lists**: Join tables become `reference_many`, inverse sides `referenced_list`
//! - **Batch loading**: Read reflected metadata documents (YAML/JSON) from a directory
//!
//! ## Example
//!
//! ```yaml
//! name: App\Entity\Post
//! fieldMappings:
//!   - fieldName: title
//!     type: string
//! associationMappings:
//!   author:
//!     fieldName: author
//!     targetEntity: App\Entity\Author
//!     isOwningSide: true
//!     joinColumns:
//!       - name: author_id
//!         referencedColumnName: id
//! ```
//!
//! becomes
//!
//! ```json
//! {
//!   "title": {"name": "title", "class": "App\\Entity\\Post", "type": "string"},
//!   "author_id": {
//!     "type": "reference",
//!     "name": "author_id",
//!     "referencedEntity": {"name": "author", "class": "App\\Entity\\Author"},
//!     "referencedField": "id"
//!   }
//! }
//! ```

// Core modules
pub mod metadata;
pub mod descriptor;
pub mod transformer;
pub mod inflector;

// Document loading, configuration and output
pub mod loader;
pub mod config;
pub mod serialization;

// Re-export key types
pub use metadata::{
    AssociationMapping, EntityMetadata, FieldMapping, InverseJoinColumn, JoinColumn, JoinTable,
    PersistenceType,
};
pub use descriptor::{EntityRef, FieldDescriptor, FieldMap, RelationField, ScalarField, UiType};
pub use transformer::{MetadataTransformer, TransformError, Transformer};
pub use loader::{load_entities, load_entity, transform_all, AdminConfig, LoadError};
pub use config::{ConfigError, GeneratorConfig, OutputFormat, Overrides};
pub use serialization::{write_config, SerializationError};

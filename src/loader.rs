//! Entity metadata document loader.
//!
//! Reads reflected entity metadata dumped as YAML or JSON and runs the
//! transformer over a whole set of entities.

use crate::descriptor::FieldMap;
use crate::metadata::EntityMetadata;
use crate::transformer::{MetadataTransformer, TransformError, Transformer};
use indexmap::IndexMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Field maps of every entity, keyed by entity class name
pub type AdminConfig = IndexMap<String, FieldMap>;

/// Error type for loading and batch transformation
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    UnknownFormat(PathBuf),
    DuplicateEntity {
        name: String,
        path: PathBuf,
    },
    Transform {
        entity: String,
        source: TransformError,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            LoadError::Yaml { path, source } => {
                write!(f, "Failed to parse YAML in {}: {}", path.display(), source)
            }
            LoadError::Json { path, source } => {
                write!(f, "Failed to parse JSON in {}: {}", path.display(), source)
            }
            LoadError::UnknownFormat(path) => write!(
                f,
                "Unsupported metadata file {} (expected .yaml, .yml or .json)",
                path.display()
            ),
            LoadError::DuplicateEntity { name, path } => {
                write!(f, "Entity '{}' is declared again in {}", name, path.display())
            }
            LoadError::Transform { entity, source } => {
                write!(f, "Failed to transform {}: {}", entity, source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Yaml { source, .. } => Some(source),
            LoadError::Json { source, .. } => Some(source),
            LoadError::Transform { source, .. } => Some(source),
            LoadError::UnknownFormat(_) | LoadError::DuplicateEntity { .. } => None,
        }
    }
}

enum DocumentFormat {
    Yaml,
    Json,
}

fn document_format(path: &Path) -> Option<DocumentFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Some(DocumentFormat::Yaml),
        Some("json") => Some(DocumentFormat::Json),
        _ => None,
    }
}

/// Load a single entity metadata document
pub fn load_entity<P: AsRef<Path>>(path: P) -> Result<EntityMetadata, LoadError> {
    let path = path.as_ref();

    let format = document_format(path).ok_or_else(|| LoadError::UnknownFormat(path.to_path_buf()))?;

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        DocumentFormat::Json => serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load every metadata document in a directory, ordered by file name.
///
/// Files with other extensions are ignored.
pub fn load_entities<P: AsRef<Path>>(dir: P) -> Result<Vec<EntityMetadata>, LoadError> {
    let dir_path = dir.as_ref();

    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && document_format(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut entities: Vec<EntityMetadata> = Vec::with_capacity(paths.len());
    for path in paths {
        let entity = load_entity(&path)?;
        if entities.iter().any(|e| e.name == entity.name) {
            return Err(LoadError::DuplicateEntity { name: entity.name, path });
        }
        tracing::debug!("Loaded {} from {}", entity.name, path.display());
        entities.push(entity);
    }

    Ok(entities)
}

/// Transform every entity, stopping at the first failure
pub fn transform_all(entities: &[EntityMetadata]) -> Result<AdminConfig, LoadError> {
    let transformer = MetadataTransformer::new();

    entities
        .iter()
        .map(|entity| {
            transformer
                .transform(entity)
                .map(|fields| (entity.name.clone(), fields))
                .map_err(|source| LoadError::Transform {
                    entity: entity.name.clone(),
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json_entity() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "user.json",
            r#"{"name": "App\\Entity\\User", "fieldMappings": [{"fieldName": "name", "type": "string"}]}"#,
        );

        let entity = load_entity(&path).unwrap();
        assert_eq!(entity.name, "App\\Entity\\User");
        assert_eq!(entity.field_mappings.len(), 1);
        assert!(entity.association_mappings.is_empty());
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "user.toml", "name = 'User'");

        assert!(matches!(load_entity(&path), Err(LoadError::UnknownFormat(_))));
    }

    #[test]
    fn test_load_entities_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b_tag.yaml", "name: App\\Entity\\Tag\n");
        write_file(dir.path(), "a_user.yml", "name: App\\Entity\\User\n");
        write_file(dir.path(), "README.md", "not metadata");

        let entities = load_entities(dir.path()).unwrap();
        let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["App\\Entity\\User", "App\\Entity\\Tag"]);
    }

    #[test]
    fn test_duplicate_entity() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "one.yaml", "name: App\\Entity\\User\n");
        write_file(dir.path(), "two.yaml", "name: App\\Entity\\User\n");

        let err = load_entities(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateEntity { ref name, .. } if name == "App\\Entity\\User"));
    }

    #[test]
    fn test_transform_all_reports_entity() {
        let entities = vec![EntityMetadata {
            name: "App\\Entity\\Event".to_string(),
            field_mappings: vec![crate::metadata::FieldMapping::new("payload", "blob")],
            ..Default::default()
        }];

        let err = transform_all(&entities).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to transform App\\Entity\\Event: Unsupported type 'blob' for field 'payload'"
        );
    }
}

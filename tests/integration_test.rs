//! Integration tests for the metadata transformer

use admingen::{
    AssociationMapping, EntityMetadata, FieldDescriptor, FieldMapping, JoinColumn,
    MetadataTransformer, TransformError, Transformer,
};
use serde_json::json;

fn user_metadata() -> EntityMetadata {
    EntityMetadata {
        name: "App\\Entity\\User".to_string(),
        field_mappings: vec![FieldMapping::new("name", "string")],
        ..Default::default()
    }
}

fn post_metadata() -> EntityMetadata {
    let mut metadata = EntityMetadata {
        name: "App\\Entity\\Post".to_string(),
        field_mappings: vec![
            FieldMapping::new("title", "string"),
            FieldMapping::new("author_id", "integer"),
        ],
        ..Default::default()
    };
    metadata.association_mappings.insert(
        "author".to_string(),
        AssociationMapping {
            field_name: "author".to_string(),
            target_entity: "App\\Entity\\Author".to_string(),
            is_owning_side: true,
            join_columns: Some(vec![JoinColumn {
                name: "author_id".to_string(),
                referenced_column_name: "id".to_string(),
            }]),
            ..Default::default()
        },
    );
    metadata
}

#[test]
fn test_single_scalar_entity() {
    let fields = MetadataTransformer.transform(&user_metadata()).unwrap();

    assert_eq!(
        serde_json::to_value(&fields).unwrap(),
        json!({
            "name": {"name": "name", "class": "App\\Entity\\User", "type": "string"}
        })
    );
}

#[test]
fn test_owning_reference() {
    let fields = MetadataTransformer.transform(&post_metadata()).unwrap();

    assert_eq!(fields.len(), 2);
    assert_eq!(
        serde_json::to_value(&fields["author_id"]).unwrap(),
        json!({
            "type": "reference",
            "name": "author_id",
            "referencedEntity": {"name": "author", "class": "App\\Entity\\Author"},
            "referencedField": "id"
        })
    );
    assert!(matches!(fields["title"], FieldDescriptor::Scalar(_)));
}

#[test]
fn test_inverse_referenced_list() {
    let mut metadata = EntityMetadata {
        name: "App\\Entity\\Author".to_string(),
        ..Default::default()
    };
    metadata.association_mappings.insert(
        "posts".to_string(),
        AssociationMapping {
            field_name: "posts".to_string(),
            target_entity: "App\\Entity\\Post".to_string(),
            is_owning_side: false,
            mapped_by: Some("author".to_string()),
            ..Default::default()
        },
    );

    let fields = MetadataTransformer.transform(&metadata).unwrap();

    assert_eq!(
        serde_json::to_value(&fields).unwrap(),
        json!({
            "posts": {
                "type": "referenced_list",
                "name": "posts",
                "referencedEntity": {"name": "post", "class": "App\\Entity\\Post"},
                "referencedField": "author_id"
            }
        })
    );
}

#[test]
fn test_transform_is_repeatable() {
    let metadata = post_metadata();
    let before = metadata.clone();

    let first = MetadataTransformer.transform(&metadata).unwrap();
    let second = MetadataTransformer.transform(&metadata).unwrap();

    assert_eq!(first, second);
    assert_eq!(metadata, before);
}

#[test]
fn test_shared_transformer_across_threads() {
    let transformer = MetadataTransformer::new();
    let metadata = post_metadata();
    let expected = transformer.transform(&metadata).unwrap();

    let (transformer, metadata) = (&transformer, &metadata);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || transformer.transform(metadata).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_reverse_transform_always_fails() {
    let fields = MetadataTransformer.transform(&post_metadata()).unwrap();

    let err = MetadataTransformer.reverse_transform(&fields).unwrap_err();
    assert_eq!(err, TransformError::UnsupportedDirection);
}

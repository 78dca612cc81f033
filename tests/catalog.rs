//! Tests for catalog loading, lookup and dispatch.
mod common;
use common::*;
use ikou::prelude::*;

#[test]
fn test_catalog_skips_invalid_entries() {
    let load = MigrationCatalog::from_json(MIXED_CATALOG_JSON).expect("document parses");

    assert_eq!(load.catalog.len(), 1);
    assert!(load.catalog.contains("LoadVideo"));
    assert!(!load.catalog.contains("SaveVideo"));
    assert!(!load.catalog.contains("GetVideoComponents"));
    assert_eq!(
        load.catalog.get("LoadVideo").map(MigrationRecord::new_node_type),
        Some("LoadVideoV2")
    );

    assert_eq!(load.rejected.len(), 3);
    match &load.rejected[0] {
        CatalogError::InvalidEntry {
            index,
            old_node_type,
            source,
        } => {
            assert_eq!(*index, 1);
            assert_eq!(old_node_type, "SaveVideo");
            assert!(matches!(source, InvalidMigrationSpec::AmbiguousInputMapping { .. }));
        }
        other => panic!("Expected InvalidEntry, got {:?}", other),
    }
    assert!(matches!(
        &load.rejected[1],
        CatalogError::InvalidEntry {
            source: InvalidMigrationSpec::InvalidOutputIndex { index: -1, .. },
            ..
        }
    ));
    assert_eq!(
        load.rejected[2],
        CatalogError::DuplicateMigration {
            index: 3,
            old_node_type: "LoadVideo".to_string(),
            existing: "LoadVideoV2".to_string(),
        }
    );
}

#[test]
fn test_catalog_rejects_malformed_document() {
    let result = MigrationCatalog::from_json("{ not json");
    assert!(matches!(result, Err(CatalogError::JsonParseError(_))));

    let not_a_list = MigrationCatalog::from_json(r#"{"new_node_type": "A", "old_node_type": "B"}"#);
    assert!(matches!(not_a_list, Err(CatalogError::JsonParseError(_))));
}

#[test]
fn test_catalog_skips_malformed_entries() {
    let json = r#"[
        {"new_node_type": "A2", "old_node_type": "A"},
        {"new_node_type": "B2", "old_node_type": "B",
         "output_mappings": [{"new_index": 0, "old_index": 1.5}]},
        {"new_node_type": "C2"},
        {"new_node_type": "D2", "old_node_type": "D"}
    ]"#;
    let load = MigrationCatalog::from_json(json).expect("document parses");

    assert_eq!(load.catalog.len(), 2);
    assert!(load.catalog.contains("A"));
    assert!(!load.catalog.contains("B"));
    assert!(load.catalog.contains("D"));

    assert_eq!(load.rejected.len(), 2);
    assert!(matches!(&load.rejected[0], CatalogError::MalformedEntry { index: 1, .. }));
    match &load.rejected[1] {
        CatalogError::MalformedEntry { index, message } => {
            assert_eq!(*index, 2);
            assert!(message.contains("old_node_type"));
        }
        other => panic!("Expected MalformedEntry, got {:?}", other),
    }
}

#[test]
fn test_collected_catalog_keeps_first_duplicate() {
    let first = MigrationRecord::builder("LoadVideoV2", "LoadVideo").build().expect("valid");
    let second = MigrationRecord::builder("LoadVideoV3", "LoadVideo").build().expect("valid");

    let catalog: MigrationCatalog = vec![first, second, create_sampler_record()].into_iter().collect();

    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get("LoadVideo").map(MigrationRecord::new_node_type),
        Some("LoadVideoV2")
    );
    assert!(catalog.contains("SamplerLegacy"));
}

#[test]
fn test_catalog_dispatches_on_old_node_type() {
    let catalog: MigrationCatalog = vec![create_sampler_record()].into_iter().collect();

    let descriptor = catalog.resolve(&create_sampler_node()).expect("registered");
    assert_eq!(descriptor.node_type, "SamplerAdvancedV2");

    let unknown = LegacyNodeInstance::new("99", "SomethingElse");
    assert_eq!(
        catalog.resolve(&unknown).unwrap_err(),
        ResolveError::NoMigration {
            node_id: "99".to_string(),
            node_type: "SomethingElse".to_string(),
        }
    );
}

#[test]
fn test_catalog_json_round_trip_is_stable() {
    let load = MigrationCatalog::from_json(LEGACY_KEYS_CATALOG_JSON).expect("document parses");
    assert!(load.rejected.is_empty());
    assert_eq!(load.catalog.len(), 2);

    let json = load.catalog.to_json().expect("serializes");
    assert!(json.contains("\"new_node_type\""));
    assert!(!json.contains("\"new_node_id\""));

    let reloaded = MigrationCatalog::from_json(&json).expect("canonical form parses");
    assert!(reloaded.rejected.is_empty());
    assert_eq!(reloaded.catalog.to_json().unwrap(), json);

    let order: Vec<&str> = reloaded.catalog.iter().map(MigrationRecord::old_node_type).collect();
    assert_eq!(order, vec!["ImageScale", "PrimitiveString"]);
}

#[test]
fn test_catalog_migrates_image_scale_node() {
    let load = MigrationCatalog::from_json(LEGACY_KEYS_CATALOG_JSON).expect("document parses");
    let legacy = LegacyNodeInstance::new("5", "ImageScale")
        .with_input("image", InputValue::wire("1", 0))
        .with_widget_values([
            serde_json::json!("nearest-exact"),
            serde_json::json!(512),
            serde_json::json!(768),
            serde_json::json!("disabled"),
        ])
        .with_link(OutputLink::new(2, 0, "6", 0));

    let descriptor = load.catalog.resolve(&legacy).expect("registered");
    assert_eq!(descriptor.input("method"), Some(&InputValue::literal("nearest-exact")));
    assert_eq!(descriptor.input("height"), Some(&InputValue::literal(768)));
    assert_eq!(descriptor.input("antialias"), Some(&InputValue::literal(true)));
    // `crop` had a widget position but no mapping.
    assert!(descriptor.input("crop").is_none());
    assert_eq!(descriptor.links_from(0), &[OutputLink::new(2, 0, "6", 0)]);
}

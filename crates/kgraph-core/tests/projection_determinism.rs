//! Projection text and ids are pure functions of the object and the config

use kgraph_core::vocab::{haley, vital};
use kgraph_core::{projection_text, vector_record_id, GenericObject, ProjectionConfig};

fn entity() -> GenericObject {
    GenericObject::new("urn:entity:apple", haley::ENTITY)
        .with(vital::HAS_NAME, "Apple Inc.")
        .with(haley::HAS_KGRAPH_DESCRIPTION, "tech company")
        .with(haley::HAS_ENTITY_TYPE_DESCRIPTION, "  ")
}

#[test]
fn projection_text_is_stable_across_derivations() {
    let config = ProjectionConfig::default();
    let obj = entity();

    let mut seen = Vec::new();
    for _ in 0..3 {
        let texts: Vec<(String, String)> = config
            .projections_for_type(haley::ENTITY)
            .into_iter()
            .map(|(id, props)| (id, projection_text(&obj, &props)))
            .collect();
        seen.push(texts);
    }
    assert!(seen.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(
        seen[0],
        vec![
            ("entity_type".to_string(), String::new()),
            ("entity_value".to_string(), "Apple Inc. tech company".to_string()),
        ]
    );
}

#[test]
fn ids_are_keyed_by_uri_and_projection() {
    let config = ProjectionConfig::default();
    let ids: Vec<String> = config
        .projection_ids_for_type(haley::ENTITY)
        .iter()
        .map(|pid| vector_record_id("urn:entity:apple", pid))
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert_eq!(ids[1], vector_record_id("urn:entity:apple", "entity_value"));
}

//! Typed values survive a write and a read through the triple store

use chrono::{TimeZone, Utc};
use kgraph_core::vocab::xsd;
use kgraph_core::{GenericObject, GraphObject, PropertyValue};
use kgraph_rdf::{generic_factory, QuadPattern, RdfSerialization, TripleStore};

const GRAPH: &str = "http://example.org/graph/main";
const CLASS: &str = "http://example.org/Event";

fn event() -> GenericObject {
    GenericObject::new("http://example.org/event/1", CLASS)
        .with("http://example.org/title", "Launch")
        .with(
            "http://example.org/at",
            Utc.with_ymd_and_hms(2023, 9, 12, 17, 0, 0).unwrap(),
        )
        .with("http://example.org/attendees", 1_200_000_000_000i64)
        .with("http://example.org/rating", 4.75)
        .with("http://example.org/public", true)
        .with_hinted("http://example.org/capacity", "500", "IntegerProperty")
        .with_hinted("http://example.org/ratio", "0.5", xsd::FLOAT)
}

#[test]
fn typed_values_round_trip_by_value() {
    let store = TripleStore::new("typed").unwrap();
    let original = event();
    store.add_object_triples(&original, Some(GRAPH)).unwrap();

    let restored = store
        .get_object(original.uri(), Some(GRAPH), &generic_factory())
        .unwrap()
        .expect("object should be reconstructed");
    let props = restored.property_entries();

    for key in [
        "http://example.org/title",
        "http://example.org/at",
        "http://example.org/attendees",
        "http://example.org/rating",
        "http://example.org/public",
    ] {
        assert_eq!(props[key].value, original.properties[key].value, "{}", key);
    }
    // hinted text reads back as its declared kind
    assert_eq!(
        props["http://example.org/capacity"].value,
        PropertyValue::Integer(500)
    );
    assert_eq!(props["http://example.org/ratio"].value, PropertyValue::Double(0.5));
    assert_eq!(restored.class_uri(), CLASS);
}

#[test]
fn round_trip_survives_serialization() {
    let source = TripleStore::new("source").unwrap();
    source.add_object_triples(&event(), Some(GRAPH)).unwrap();
    let nquads = source.dump(RdfSerialization::NQuads, None).unwrap();

    let target = TripleStore::new("target").unwrap();
    target
        .bulk_load(
            &kgraph_rdf::LoadSource::text(nquads),
            RdfSerialization::NQuads,
            None,
        )
        .unwrap();
    assert_eq!(target.count().unwrap(), source.count().unwrap());

    let restored = target
        .get_object("http://example.org/event/1", Some(GRAPH), &generic_factory())
        .unwrap()
        .unwrap();
    assert_eq!(
        restored.property_entries()["http://example.org/at"].value,
        PropertyValue::DateTime(Utc.with_ymd_and_hms(2023, 9, 12, 17, 0, 0).unwrap())
    );
}

#[test]
fn sparql_sees_typed_literals() {
    let store = TripleStore::new("typed").unwrap();
    store.add_object_triples(&event(), Some(GRAPH)).unwrap();

    let rows = store
        .query(&format!(
            "SELECT ?e WHERE {{ GRAPH <{}> {{ ?e <http://example.org/rating> ?r FILTER(?r > 4.5) }} }}",
            GRAPH
        ))
        .unwrap()
        .into_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["e"], "http://example.org/event/1");

    assert!(store
        .contains(&QuadPattern::any().graph(GRAPH).predicate("http://example.org/public"))
        .unwrap());
}

//! Payload filters narrow searches the same way regardless of how they are built

use std::sync::Arc;

use kgraph_core::test_support::MockEmbeddingProvider;
use kgraph_core::{payload_keys, DistanceMetric, Payload};
use kgraph_vector::{Range, VectorFilter, VectorStore};
use serde_json::json;
use test_case::test_case;

async fn company_store(metric: DistanceMetric) -> VectorStore {
    let store = VectorStore::new("companies", Arc::new(MockEmbeddingProvider::default()))
        .with_metric(metric);
    let rows = [
        ("apple", "Apple Inc technology company", "http://c/Company", 1976),
        ("msft", "Microsoft technology company", "http://c/Company", 1975),
        ("jobs", "Steve Jobs founder of Apple", "http://c/Person", 1955),
    ];
    for (id, text, ty, year) in rows {
        let mut payload = Payload::new();
        payload.insert(payload_keys::URI.into(), json!(format!("http://e/{}", id)));
        payload.insert(payload_keys::TYPE.into(), json!(ty));
        payload.insert("founded".into(), json!(year));
        store.add_text(text, payload, Some(id.into())).await.unwrap();
    }
    store
}

#[test_case(DistanceMetric::Cosine ; "cosine")]
#[test_case(DistanceMetric::Dot ; "dot")]
#[test_case(DistanceMetric::Euclidean ; "euclidean")]
#[tokio::test]
async fn type_filter_excludes_other_types(metric: DistanceMetric) {
    let store = company_store(metric).await;
    let filter = VectorFilter::new().eq(payload_keys::TYPE, "http://c/Company");
    let hits = store
        .search_by_text("Apple", 10, Some(&filter), None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "apple");
    assert!(hits.iter().all(|h| h.payload_str(payload_keys::TYPE) == Some("http://c/Company")));
}

#[tokio::test]
async fn json_and_builder_filters_agree() {
    let store = company_store(DistanceMetric::Cosine).await;
    let built = VectorFilter::new().range(
        "founded",
        Range {
            gte: Some(1970.0),
            ..Default::default()
        },
    );
    let parsed = VectorFilter::from_json(&json!({"founded": {"gte": 1970}})).unwrap();
    assert_eq!(built, parsed);

    let hits = store
        .search_by_text("technology", 10, Some(&parsed), None)
        .await
        .unwrap();
    let mut ids: Vec<_> = hits.into_iter().map(|h| h.id).collect();
    ids.sort();
    assert_eq!(ids, vec!["apple", "msft"]);
}

#[tokio::test]
async fn batch_insert_requires_matching_lengths() {
    let store = VectorStore::new("batch", Arc::new(MockEmbeddingProvider::default()));
    let err = store
        .add_texts(&["a", "b"], vec![Payload::new()], None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("payloads"));

    let ids = store
        .add_texts(
            &["a", "b"],
            vec![Payload::new(), Payload::new()],
            Some(vec!["x".into(), "y".into()]),
        )
        .await
        .unwrap();
    assert_eq!(ids, vec!["x", "y"]);
    assert_eq!(store.count(), 2);
}

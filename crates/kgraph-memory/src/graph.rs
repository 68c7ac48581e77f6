//! The synchronization engine
//!
//! A [`KGraph`] owns one triple store, one vector store, the projection
//! config and the type registry. Every write goes to both stores; reads go to
//! whichever store answers them.
//!
//! The triple write comes first and gates the rest: if the object's triples
//! cannot be stored, no vectors are written and the object is not
//! registered. After that, each projection's vector write is attempted
//! independently and a failure in one is logged and reported as `false`
//! without blocking the others. Retrying the same call converges, since quads
//! have set semantics and vector ids are derived from the object URI and
//! projection id.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use kgraph_config::{KGraphConfig, MetricConfig};
use kgraph_core::{
    payload_keys, projection_text, vector_record_id, DistanceMetric, EmbeddingProvider,
    GraphObject, ObjectFactory, Payload, ProjectionConfig, RdfTerm, StorageError, StorageResult,
    VectorRecord,
};
use kgraph_rdf::{generic_factory, validate_iri, LoadSource, QuadPattern, RdfSerialization, TripleStore};
use kgraph_vector::VectorStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Counters describing a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub graph_id: String,
    pub graph_uri: String,
    pub triple_count: usize,
    pub vector_count: usize,
    pub registered_objects: usize,
    pub projection_types: usize,
}

/// One knowledge graph with its triple and vector stores
///
/// Mutations take `&mut self`; share a graph between tasks behind a
/// `tokio::sync::RwLock`.
pub struct KGraph {
    graph_id: String,
    graph_uri: String,
    pub(crate) triples: TripleStore,
    pub(crate) vectors: VectorStore,
    projections: ProjectionConfig,
    factory: Arc<dyn ObjectFactory>,
    /// uri → type uri, used to target projection cleanup
    registry: HashMap<String, String>,
}

impl std::fmt::Debug for KGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KGraph")
            .field("graph_id", &self.graph_id)
            .field("graph_uri", &self.graph_uri)
            .field("vectors", &self.vectors)
            .field("registered", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Reject an object URI before any store is touched
fn check_identity(uri: &str) -> StorageResult<()> {
    if uri.trim().is_empty() {
        return Err(StorageError::MissingIdentity);
    }
    Ok(validate_iri(uri)?)
}

fn metric_from_config(metric: MetricConfig) -> DistanceMetric {
    match metric {
        MetricConfig::Cosine => DistanceMetric::Cosine,
        MetricConfig::Dot => DistanceMetric::Dot,
        MetricConfig::Euclidean => DistanceMetric::Euclidean,
    }
}

impl KGraph {
    /// Create a graph writing triples into the named graph `graph_uri`
    ///
    /// Uses the built-in projection config and the generic object factory.
    pub fn new(
        graph_id: impl Into<String>,
        graph_uri: impl Into<String>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> StorageResult<Self> {
        let graph_id = graph_id.into();
        let vectors = VectorStore::new(graph_id.clone(), provider);
        Self::with_stores(graph_id, graph_uri.into(), vectors)
    }

    fn with_stores(graph_id: String, graph_uri: String, vectors: VectorStore) -> StorageResult<Self> {
        let triples = TripleStore::new(graph_id.clone())?;
        info!(graph_id = %graph_id, graph_uri = %graph_uri, "Created knowledge graph");
        Ok(Self {
            graph_id,
            graph_uri,
            triples,
            vectors,
            projections: ProjectionConfig::builtin(),
            factory: Arc::new(generic_factory()),
            registry: HashMap::new(),
        })
    }

    /// Build a graph from a loaded configuration
    pub fn from_config(config: &KGraphConfig, provider: Arc<dyn EmbeddingProvider>) -> StorageResult<Self> {
        config
            .validate()
            .map_err(|e| StorageError::Configuration(e.to_string()))?;

        let overrides = config.projections.types.clone();
        let projections = if config.projections.replace_defaults {
            ProjectionConfig::from_mappings(overrides)
        } else {
            ProjectionConfig::builtin().merge(overrides)
        };

        let vectors = VectorStore::new(config.graph.id.clone(), provider)
            .with_metric(metric_from_config(config.vector_store.metric))
            .with_collection(config.collection_name());
        Ok(Self::with_stores(config.graph.id.clone(), config.graph.uri.clone(), vectors)?
            .with_projections(projections))
    }

    /// Builder: replace the projection config
    pub fn with_projections(mut self, projections: ProjectionConfig) -> Self {
        self.projections = projections;
        self
    }

    /// Builder: replace the factory used to rebuild objects from triples
    pub fn with_factory(mut self, factory: Arc<dyn ObjectFactory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn graph_id(&self) -> &str {
        &self.graph_id
    }

    pub fn graph_uri(&self) -> &str {
        &self.graph_uri
    }

    pub fn projections(&self) -> &ProjectionConfig {
        &self.projections
    }

    pub fn triple_store(&self) -> &TripleStore {
        &self.triples
    }

    pub fn vector_store(&self) -> &VectorStore {
        &self.vectors
    }

    /// Registered type of `uri`, if this process has written it
    pub fn registered_type(&self, uri: &str) -> Option<&str> {
        self.registry.get(uri).map(String::as_str)
    }

    // === Writes ===

    /// Write an object's triples and projection vectors, then register it
    ///
    /// Returns `Ok(false)` if any step failed. A failed triple write stops
    /// there, leaving no vectors and no registry entry; a failed projection
    /// leaves the other steps committed. An object without a URI is rejected
    /// with `MissingIdentity`, and one whose URI is not an absolute IRI with
    /// `AdapterMismatch`, before anything is written.
    pub async fn add_object(&mut self, object: &dyn GraphObject) -> StorageResult<bool> {
        let uri = object.uri();
        check_identity(uri)?;
        let type_uri = object.class_uri();
        let mut ok = true;

        match self.triples.add_object_triples(object, Some(&self.graph_uri)) {
            Ok(added) => debug!(uri = %uri, added, "Wrote triples"),
            Err(e) => {
                warn!(uri = %uri, error = %e, "Failed to write triples, skipping projections");
                return Ok(false);
            }
        }

        let projections = self.projections.projections_for_type(type_uri);
        let mapped: BTreeSet<String> = projections
            .iter()
            .flat_map(|(_, properties)| properties.iter().cloned())
            .collect();
        for (projection_id, properties) in &projections {
            if let Err(e) = self
                .write_projection(object, projection_id, properties, &mapped)
                .await
            {
                warn!(uri = %uri, projection = %projection_id, error = %e, "Failed to write projection");
                ok = false;
            }
        }

        self.registry.insert(uri.to_string(), type_uri.to_string());
        Ok(ok)
    }

    /// Embed one projection; an empty projection text writes nothing
    ///
    /// The payload carries every property `mapped` by the type's projections,
    /// not only this projection's, so filters work on any mapped property.
    async fn write_projection(
        &self,
        object: &dyn GraphObject,
        projection_id: &str,
        properties: &[String],
        mapped: &BTreeSet<String>,
    ) -> StorageResult<()> {
        let text = projection_text(object, properties);
        if text.is_empty() {
            debug!(uri = %object.uri(), projection = %projection_id, "Empty projection, skipping");
            return Ok(());
        }

        let id = vector_record_id(object.uri(), projection_id);
        let payload = self.projection_payload(object, projection_id, properties, mapped);
        self.vectors.add_text(&text, payload, Some(id)).await?;
        debug!(uri = %object.uri(), projection = %projection_id, "Wrote projection vector");
        Ok(())
    }

    fn projection_payload(
        &self,
        object: &dyn GraphObject,
        projection_id: &str,
        properties: &[String],
        mapped: &BTreeSet<String>,
    ) -> Payload {
        let mut payload = Payload::new();
        payload.insert(payload_keys::URI.into(), Value::from(object.uri()));
        payload.insert(payload_keys::TYPE.into(), Value::from(object.class_uri()));
        payload.insert(payload_keys::GRAPH.into(), Value::from(self.graph_uri.as_str()));
        payload.insert(payload_keys::PROJECTION_ID.into(), Value::from(projection_id));
        payload.insert(
            payload_keys::PROJECTION_PROPERTIES.into(),
            Value::from(properties.to_vec()),
        );

        let entries = object.property_entries();
        for property in mapped {
            if let Some(entry) = entries.get(property) {
                if !entry.value.is_null() {
                    payload.insert(property.clone(), entry.value.to_json());
                }
            }
        }
        payload
    }

    /// Write several objects in order; returns how many fully succeeded
    ///
    /// Not atomic. An object without a valid URI stops the batch with its
    /// error, leaving the earlier objects written and the later ones not.
    pub async fn add_objects(&mut self, objects: &[&dyn GraphObject]) -> StorageResult<usize> {
        let mut succeeded = 0;
        for object in objects {
            if self.add_object(*object).await? {
                succeeded += 1;
            }
        }
        info!(graph_id = %self.graph_id, total = objects.len(), succeeded, "Added objects");
        Ok(succeeded)
    }

    /// Replace an object: drop its triples and every projection vector its
    /// old and new types declare, then add it again
    pub async fn update_object(&mut self, object: &dyn GraphObject) -> StorageResult<bool> {
        let uri = object.uri();
        check_identity(uri)?;

        let mut types = self.known_types(uri);
        types.insert(object.class_uri().to_string());
        let mut ok = true;

        let subject = QuadPattern::any()
            .subject(RdfTerm::named(uri))
            .graph(self.graph_uri.as_str());
        if let Err(e) = self.triples.remove_quads(&subject) {
            warn!(uri = %uri, error = %e, "Failed to remove previous triples");
            ok = false;
        }
        let removed = self.vectors.delete(&self.projection_record_ids(uri, &types));
        debug!(uri = %uri, removed, "Cleared previous projection vectors");

        Ok(self.add_object(object).await? && ok)
    }

    /// Remove an object's triples (outgoing and incoming), its projection
    /// vectors and its registry entry
    ///
    /// Removing an unknown URI succeeds and changes nothing.
    pub fn remove_object(&mut self, uri: &str) -> bool {
        if uri.trim().is_empty() {
            warn!("Ignoring remove of an object without a URI");
            return false;
        }

        let types = self.known_types(uri);
        let node = RdfTerm::named(uri);
        let mut ok = true;

        for pattern in [
            QuadPattern::any().subject(node.clone()),
            QuadPattern::any().object(node),
        ] {
            match self.triples.remove_quads(&pattern.graph(self.graph_uri.as_str())) {
                Ok(removed) => debug!(uri = %uri, removed, "Removed triples"),
                Err(e) => {
                    warn!(uri = %uri, error = %e, "Failed to remove triples");
                    ok = false;
                }
            }
        }

        let removed = self.vectors.delete(&self.projection_record_ids(uri, &types));
        self.registry.remove(uri);
        debug!(uri = %uri, vectors = removed, "Removed object");
        ok
    }

    /// Types whose projections may hold vectors for `uri`
    ///
    /// The registry answers first; after a restart it is empty, so the
    /// stored `rdf:type` quads are consulted instead.
    fn known_types(&self, uri: &str) -> BTreeSet<String> {
        if let Some(type_uri) = self.registry.get(uri) {
            return BTreeSet::from([type_uri.clone()]);
        }
        match self.triples.types_of(uri, Some(&self.graph_uri)) {
            Ok(types) => types.into_iter().collect(),
            Err(e) => {
                warn!(uri = %uri, error = %e, "Failed to read stored types");
                BTreeSet::new()
            }
        }
    }

    fn projection_record_ids(&self, uri: &str, types: &BTreeSet<String>) -> Vec<String> {
        types
            .iter()
            .flat_map(|type_uri| self.projections.projection_ids_for_type(type_uri))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|projection_id| vector_record_id(uri, &projection_id))
            .collect()
    }

    /// Empty both stores and the registry
    pub fn clear(&mut self) -> StorageResult<()> {
        self.triples.clear()?;
        self.vectors.clear();
        self.registry.clear();
        info!(graph_id = %self.graph_id, "Cleared knowledge graph");
        Ok(())
    }

    /// Load a serialized RDF document into this graph's named graph
    ///
    /// Loaded objects are not embedded; re-add them to index projections.
    pub fn load_rdf(&self, source: &LoadSource, format: RdfSerialization) -> StorageResult<usize> {
        Ok(self.triples.bulk_load(source, format, Some(&self.graph_uri))?)
    }

    /// Serialize this graph's named graph
    pub fn dump_rdf(&self, format: RdfSerialization) -> StorageResult<String> {
        Ok(self.triples.dump(format, Some(&self.graph_uri))?)
    }

    // === Reads ===

    /// Rebuild an object from its triples; `None` if absent or unresolvable
    pub fn get_object(&self, uri: &str) -> Option<Box<dyn GraphObject>> {
        self.triples
            .get_object(uri, Some(&self.graph_uri), self.factory.as_ref())
            .unwrap_or_else(|e| {
                warn!(uri = %uri, error = %e, "Failed to read object");
                None
            })
    }

    /// Rebuild several objects; unresolved URIs are omitted
    pub fn get_objects(&self, uris: &[&str]) -> BTreeMap<String, Box<dyn GraphObject>> {
        self.triples
            .get_objects(uris, Some(&self.graph_uri), self.factory.as_ref())
            .unwrap_or_else(|e| {
                warn!(count = uris.len(), error = %e, "Failed to read objects");
                BTreeMap::new()
            })
    }

    /// Stored projection vectors of an object, keyed by projection id
    pub fn get_object_vectors(&self, uri: &str) -> BTreeMap<String, VectorRecord> {
        self.known_types(uri)
            .iter()
            .flat_map(|type_uri| self.projections.projection_ids_for_type(type_uri))
            .filter_map(|projection_id| {
                self.vectors
                    .get_by_id(&vector_record_id(uri, &projection_id))
                    .map(|record| (projection_id, record))
            })
            .collect()
    }

    /// Projection ids that currently hold a vector for `uri`
    pub fn projection_ids_for_object(&self, uri: &str) -> Vec<String> {
        self.get_object_vectors(uri).into_keys().collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            graph_id: self.graph_id.clone(),
            graph_uri: self.graph_uri.clone(),
            triple_count: self.triples.count().unwrap_or_else(|e| {
                warn!(error = %e, "Failed to count triples");
                0
            }),
            vector_count: self.vectors.count(),
            registered_objects: self.registry.len(),
            projection_types: self.projections.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgraph_core::test_support::MockEmbeddingProvider;
    use kgraph_core::vocab::{vital, IDENTITY_PREDICATE, PRIMARY_TYPE_PREDICATE, RDF_TYPE};
    use kgraph_core::{GenericObject, PropertyValue};
    use test_case::test_case;

    const G: &str = "http://example.org/graph/test";
    const T: &str = "http://example.org/Thing";
    const NAME: &str = "http://example.org/name";
    const DESC: &str = "http://example.org/desc";

    fn graph() -> KGraph {
        KGraph::new("test", G, Arc::new(MockEmbeddingProvider::default()))
            .unwrap()
            .with_projections(
                ProjectionConfig::empty()
                    .with_type(T, [("general", &[NAME, DESC][..]), ("name", &[NAME][..])]),
            )
    }

    fn thing(n: u32, name: &str, desc: &str) -> GenericObject {
        GenericObject::new(format!("http://example.org/thing/{}", n), T)
            .with(NAME, name)
            .with(DESC, desc)
    }

    #[tokio::test]
    async fn test_add_writes_both_stores() {
        let mut graph = graph();
        let obj = thing(1, "Apple Inc.", "tech company");
        assert!(graph.add_object(&obj).await.unwrap());

        let subject = QuadPattern::any().subject(RdfTerm::named(obj.uri())).graph(G);
        let quads = graph.triple_store().get_quads(&subject).unwrap();
        assert!(quads.iter().any(|q| q.predicate == RDF_TYPE));
        assert!(quads.iter().any(|q| q.predicate == IDENTITY_PREDICATE));
        assert!(quads.iter().any(|q| q.predicate == PRIMARY_TYPE_PREDICATE));
        assert_eq!(quads.len(), 5);

        assert_eq!(graph.vector_store().count(), 2);
        assert_eq!(graph.registered_type(obj.uri()), Some(T));
    }

    #[tokio::test]
    async fn test_payload_contents() {
        let mut graph = graph();
        let obj = thing(1, "Apple Inc.", "tech company");
        graph.add_object(&obj).await.unwrap();

        let vectors = graph.get_object_vectors(obj.uri());
        let general = &vectors["general"];
        assert_eq!(general.id, vector_record_id(obj.uri(), "general"));
        assert_eq!(general.text.as_deref(), Some("Apple Inc. tech company"));
        assert_eq!(general.payload_str(payload_keys::URI), Some(obj.uri()));
        assert_eq!(general.payload_str(payload_keys::TYPE), Some(T));
        assert_eq!(general.payload_str(payload_keys::GRAPH), Some(G));
        assert_eq!(general.payload_str(payload_keys::PROJECTION_ID), Some("general"));
        assert_eq!(
            general.payload[payload_keys::PROJECTION_PROPERTIES],
            serde_json::json!([NAME, DESC])
        );
        assert_eq!(general.payload[NAME], serde_json::json!("Apple Inc."));

        // every mapped property rides along, whatever the projection
        let name = &vectors["name"];
        assert_eq!(name.payload[payload_keys::PROJECTION_PROPERTIES], serde_json::json!([NAME]));
        assert_eq!(name.payload[DESC], serde_json::json!("tech company"));
    }

    #[tokio::test]
    async fn test_unmapped_and_null_properties_stay_out_of_payload() {
        let mut graph = graph();
        let obj = thing(1, "Apple", "tech")
            .with("http://example.org/unmapped", "x")
            .with(DESC, PropertyValue::Null);
        graph.add_object(&obj).await.unwrap();
        let payload = &graph.get_object_vectors(obj.uri())["name"].payload;
        assert!(!payload.contains_key("http://example.org/unmapped"));
        assert!(!payload.contains_key(DESC));
    }

    #[tokio::test]
    async fn test_missing_uri_is_rejected() {
        let mut graph = graph();
        let obj = GenericObject::new("", T).with(NAME, "x");
        assert_eq!(graph.add_object(&obj).await, Err(StorageError::MissingIdentity));
        assert_eq!(graph.update_object(&obj).await, Err(StorageError::MissingIdentity));
        assert_eq!(graph.stats().triple_count, 0);
        assert!(!graph.remove_object(""));
    }

    #[test_case("not a uri" ; "spaces")]
    #[test_case("urn" ; "no scheme")]
    #[test_case("http://example.org/a b" ; "embedded space")]
    #[tokio::test]
    async fn test_invalid_uri_writes_nothing(uri: &str) {
        let mut graph = graph();
        let obj = GenericObject::new(uri, T).with(NAME, "x").with(DESC, "y");

        let err = graph.add_object(&obj).await.unwrap_err();
        assert!(matches!(err, StorageError::AdapterMismatch(_)));
        assert!(matches!(
            graph.update_object(&obj).await,
            Err(StorageError::AdapterMismatch(_))
        ));

        assert_eq!(graph.stats().triple_count, 0);
        assert_eq!(graph.vector_store().count(), 0);
        assert_eq!(graph.registered_type(uri), None);
    }

    #[tokio::test]
    async fn test_failed_triple_write_skips_vectors() {
        let mut graph = graph();
        let obj = GenericObject::new("http://example.org/thing/1", "bad type").with(NAME, "x");
        graph.projections = graph
            .projections
            .clone()
            .with_type("bad type", [("name", &[NAME][..])]);

        assert!(!graph.add_object(&obj).await.unwrap());
        assert_eq!(graph.stats().triple_count, 0);
        assert_eq!(graph.vector_store().count(), 0);
        assert_eq!(graph.registered_type(obj.uri()), None);
    }

    #[tokio::test]
    async fn test_type_without_projections_is_structural_only() {
        let mut graph = graph();
        let obj = GenericObject::new("http://example.org/other/1", "http://example.org/Other")
            .with(NAME, "Structural");
        assert!(graph.add_object(&obj).await.unwrap());
        assert_eq!(graph.vector_store().count(), 0);
        assert!(graph.get_object(obj.uri()).is_some());
    }

    #[tokio::test]
    async fn test_embedding_failure_is_best_effort() {
        let provider = Arc::new(MockEmbeddingProvider::default().with_failure_on("poison"));
        let mut graph = KGraph::new("test", G, provider.clone())
            .unwrap()
            .with_projections(
                ProjectionConfig::empty()
                    .with_type(T, [("name", &[NAME][..]), ("desc", &[DESC][..])]),
            );
        let obj = thing(1, "fine", "poison");
        assert!(!graph.add_object(&obj).await.unwrap());

        // triples and the healthy projection are still written
        assert!(graph.get_object(obj.uri()).is_some());
        assert_eq!(graph.projection_ids_for_object(obj.uri()), vec!["name"]);

        provider.set_failure_on(None);
        assert!(graph.add_object(&obj).await.unwrap());
        assert_eq!(graph.projection_ids_for_object(obj.uri()), vec!["desc", "name"]);
    }

    #[tokio::test]
    async fn test_update_with_new_type_clears_old_projections() {
        let mut graph = graph();
        let other = "http://example.org/Other";
        graph.projections = graph
            .projections
            .clone()
            .with_type(other, [("summary", &[DESC][..])]);

        let obj = thing(1, "Apple", "tech");
        graph.add_object(&obj).await.unwrap();

        let retyped = GenericObject::new(obj.uri(), other).with(DESC, "fruit");
        assert!(graph.update_object(&retyped).await.unwrap());
        assert_eq!(graph.projection_ids_for_object(obj.uri()), vec!["summary"]);
        assert!(graph
            .vector_store()
            .get_by_id(&vector_record_id(obj.uri(), "general"))
            .is_none());
        assert_eq!(graph.vector_store().count(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_after_restart_uses_stored_types() {
        let mut graph = graph();
        let obj = thing(1, "Apple", "tech");
        graph.add_object(&obj).await.unwrap();

        // simulate a process that never saw the add
        graph.registry.clear();
        assert_eq!(graph.get_object_vectors(obj.uri()).len(), 2);
        assert!(graph.remove_object(obj.uri()));
        assert_eq!(graph.vector_store().count(), 0);
    }

    #[tokio::test]
    async fn test_remove_severs_inbound_edges() {
        let mut graph = graph();
        let target = thing(1, "Target", "");
        let source = thing(2, "Source", "")
            .with("http://example.org/linksTo", PropertyValue::uri(target.uri()));
        graph.add_object(&target).await.unwrap();
        graph.add_object(&source).await.unwrap();

        assert!(graph.remove_object(target.uri()));
        let inbound = QuadPattern::any().object(RdfTerm::named(target.uri()));
        assert!(!graph.triple_store().contains(&inbound).unwrap());
        // the linking object itself survives
        assert!(graph.get_object(source.uri()).is_some());
    }

    #[tokio::test]
    async fn test_remove_unknown_uri_is_noop() {
        let mut graph = graph();
        assert!(graph.remove_object("http://example.org/nothing"));
        assert_eq!(graph.stats().triple_count, 0);
    }

    #[tokio::test]
    async fn test_add_objects_counts_successes() {
        let mut graph = graph();
        let a = thing(1, "A", "first");
        let b = thing(2, "B", "second");
        let n = graph.add_objects(&[&a, &b]).await.unwrap();
        assert_eq!(n, 2);
        assert_eq!(graph.stats().registered_objects, 2);
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = KGraphConfig::default()
            .with_graph("people", "http://example.org/graph/people")
            .with_metric(MetricConfig::Dot)
            .with_projection(T, "name", [NAME]);
        let graph = KGraph::from_config(&config, Arc::new(MockEmbeddingProvider::default())).unwrap();

        assert_eq!(graph.graph_uri(), "http://example.org/graph/people");
        assert_eq!(graph.vector_store().metric(), DistanceMetric::Dot);
        assert_eq!(graph.vector_store().collection(), "people_vectors");
        assert_eq!(graph.projections().projection_ids_for_type(T), vec!["name"]);
        // builtin types kept when merging
        assert!(graph.projections().has_projections(vital::NODE));

        let replace = {
            let mut c = config.clone();
            c.projections.replace_defaults = true;
            c
        };
        let graph = KGraph::from_config(&replace, Arc::new(MockEmbeddingProvider::default())).unwrap();
        assert!(!graph.projections().has_projections(vital::NODE));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = KGraphConfig::default().with_graph("", "http://example.org/g");
        let err = KGraph::from_config(&config, Arc::new(MockEmbeddingProvider::default())).unwrap_err();
        assert!(matches!(err, StorageError::Configuration(_)));
    }
}

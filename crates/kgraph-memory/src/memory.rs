//! Container for several independent graphs

use std::collections::BTreeMap;
use std::sync::Arc;

use kgraph_config::KGraphConfig;
use kgraph_core::{EmbeddingProvider, ProjectionConfig, StorageError, StorageResult};
use tracing::info;

use crate::graph::KGraph;

/// Graphs keyed by graph URI, sharing one embedding provider
///
/// Each graph owns its own stores and registry; nothing is shared between
/// them except the provider.
pub struct KGraphMemory {
    provider: Arc<dyn EmbeddingProvider>,
    projections: ProjectionConfig,
    graphs: BTreeMap<String, KGraph>,
}

impl std::fmt::Debug for KGraphMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KGraphMemory")
            .field("model", &self.provider.model_name())
            .field("graphs", &self.graphs.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl KGraphMemory {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            projections: ProjectionConfig::builtin(),
            graphs: BTreeMap::new(),
        }
    }

    /// Builder: projection config handed to graphs created afterwards
    pub fn with_projections(mut self, projections: ProjectionConfig) -> Self {
        self.projections = projections;
        self
    }

    /// Create an empty graph; fails if `graph_uri` is already taken
    pub fn create_graph(&mut self, graph_id: &str, graph_uri: &str) -> StorageResult<&mut KGraph> {
        self.ensure_free(graph_uri)?;
        let graph = KGraph::new(graph_id, graph_uri, Arc::clone(&self.provider))?
            .with_projections(self.projections.clone());
        Ok(self.insert(graph))
    }

    /// Create a graph from configuration, with the config's own projections
    pub fn create_graph_from_config(&mut self, config: &KGraphConfig) -> StorageResult<&mut KGraph> {
        self.ensure_free(&config.graph.uri)?;
        let graph = KGraph::from_config(config, Arc::clone(&self.provider))?;
        Ok(self.insert(graph))
    }

    fn ensure_free(&self, graph_uri: &str) -> StorageResult<()> {
        if self.graphs.contains_key(graph_uri) {
            return Err(StorageError::Configuration(format!(
                "graph {} already exists",
                graph_uri
            )));
        }
        Ok(())
    }

    fn insert(&mut self, graph: KGraph) -> &mut KGraph {
        info!(graph_uri = %graph.graph_uri(), total = self.graphs.len() + 1, "Registered graph");
        self.graphs
            .entry(graph.graph_uri().to_string())
            .or_insert(graph)
    }

    pub fn graph(&self, graph_uri: &str) -> Option<&KGraph> {
        self.graphs.get(graph_uri)
    }

    pub fn graph_mut(&mut self, graph_uri: &str) -> Option<&mut KGraph> {
        self.graphs.get_mut(graph_uri)
    }

    /// Detach a graph and hand it back; its stores go with it
    pub fn remove_graph(&mut self, graph_uri: &str) -> Option<KGraph> {
        let removed = self.graphs.remove(graph_uri);
        if removed.is_some() {
            info!(graph_uri = %graph_uri, "Removed graph");
        }
        removed
    }

    pub fn graph_uris(&self) -> Vec<String> {
        self.graphs.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

//! Query surface: SPARQL, similarity search and hybrid search
//!
//! Query errors never propagate out of this layer. A malformed SPARQL text or
//! a failing embedding call is logged and answered with an empty result, so
//! one bad hybrid fragment cannot fail a whole search.

use std::collections::HashMap;

use kgraph_core::{looks_like_uri, payload_keys, GraphObject, VectorHit};
use kgraph_rdf::QueryOutcome;
use kgraph_vector::VectorFilter;
use tracing::{debug, warn};

use crate::graph::KGraph;

/// A similarity hit that passed the structural filter
#[derive(Debug)]
pub struct HybridHit {
    pub hit: VectorHit,
    /// The object rebuilt from its triples, when a structural filter ran
    pub object: Option<Box<dyn GraphObject>>,
}

impl HybridHit {
    pub fn uri(&self) -> Option<&str> {
        self.hit.uri()
    }

    pub fn score(&self) -> f32 {
        self.hit.score
    }
}

impl KGraph {
    /// Evaluate a SPARQL query; errors yield an empty SELECT result
    pub fn sparql(&self, query: &str) -> QueryOutcome {
        self.triples.query(query).unwrap_or_else(|e| {
            warn!(graph_id = %self.graph_id(), error = %e, "SPARQL query failed");
            QueryOutcome::Select(Vec::new())
        })
    }

    /// Evaluate an ASK query; errors yield `false`
    pub fn sparql_ask(&self, query: &str) -> bool {
        self.triples.ask(query).unwrap_or_else(|e| {
            warn!(graph_id = %self.graph_id(), error = %e, "SPARQL ASK failed");
            false
        })
    }

    /// Run a SPARQL UPDATE; `false` if it was rejected
    ///
    /// Updates bypass the vector store, so projections of touched objects
    /// are not refreshed.
    pub fn sparql_update(&self, update: &str) -> bool {
        match self.triples.update(update) {
            Ok(()) => true,
            Err(e) => {
                warn!(graph_id = %self.graph_id(), error = %e, "SPARQL UPDATE failed");
                false
            }
        }
    }

    /// Similarity search over every projection
    pub async fn vector_search(
        &self,
        text: &str,
        filter: Option<&VectorFilter>,
        limit: usize,
        score_threshold: Option<f32>,
    ) -> Vec<VectorHit> {
        self.vectors
            .search_by_text(text, limit, filter, score_threshold)
            .await
            .unwrap_or_else(|e| {
                warn!(graph_id = %self.graph_id(), error = %e, "Vector search failed");
                Vec::new()
            })
    }

    /// Similarity search restricted to one projection id
    pub async fn vector_search_by_projection(
        &self,
        text: &str,
        projection_id: &str,
        filter: Option<&VectorFilter>,
        limit: usize,
        score_threshold: Option<f32>,
    ) -> Vec<VectorHit> {
        let filter = filter
            .cloned()
            .unwrap_or_default()
            .eq(payload_keys::PROJECTION_ID, projection_id);
        self.vector_search(text, Some(&filter), limit, score_threshold)
            .await
    }

    /// Similarity search with a precomputed query vector
    pub fn vector_search_by_vector(
        &self,
        vector: &[f32],
        filter: Option<&VectorFilter>,
        limit: usize,
        score_threshold: Option<f32>,
    ) -> Vec<VectorHit> {
        self.vectors
            .search_by_vector(vector, limit, filter, score_threshold)
            .unwrap_or_else(|e| {
                warn!(graph_id = %self.graph_id(), error = %e, "Vector search failed");
                Vec::new()
            })
    }

    /// Similarity search narrowed by a SPARQL graph pattern
    ///
    /// Fetches `2 * limit` candidates. Without a fragment the first `limit`
    /// are returned as they are. With one, candidates are checked in score
    /// order and kept while
    ///
    /// ```sparql
    /// ASK { GRAPH <graph> { VALUES ?uri { <candidate> } ?uri ?p ?o . FRAGMENT } }
    /// ```
    ///
    /// holds, until `limit` are kept. Candidates beyond the fetched window are
    /// never considered, so fewer than `limit` results may come back.
    pub async fn hybrid_search(
        &self,
        text: &str,
        sparql_fragment: Option<&str>,
        filter: Option<&VectorFilter>,
        limit: usize,
    ) -> Vec<HybridHit> {
        let candidates = self
            .vector_search(text, filter, limit.saturating_mul(2), None)
            .await;

        let Some(fragment) = sparql_fragment.filter(|f| !f.trim().is_empty()) else {
            return candidates
                .into_iter()
                .take(limit)
                .map(|hit| HybridHit { hit, object: None })
                .collect();
        };

        let mut verdicts: HashMap<String, bool> = HashMap::new();
        let mut kept = Vec::new();
        for hit in candidates {
            if kept.len() >= limit {
                break;
            }
            let Some(uri) = hit.uri().map(str::to_string) else {
                continue;
            };
            let holds = *verdicts
                .entry(uri.clone())
                .or_insert_with(|| self.fragment_holds(&uri, fragment));
            if holds {
                kept.push(HybridHit {
                    object: self.get_object(&uri),
                    hit,
                });
            }
        }
        debug!(
            graph_id = %self.graph_id(),
            checked = verdicts.len(),
            kept = kept.len(),
            "Hybrid search filtered candidates"
        );
        kept
    }

    fn fragment_holds(&self, uri: &str, fragment: &str) -> bool {
        if !looks_like_uri(uri) || uri.contains(['<', '>', '"', ' ']) {
            warn!(uri = %uri, "Skipping candidate whose URI cannot be bound in SPARQL");
            return false;
        }
        let ask = format!(
            "ASK {{ GRAPH <{graph}> {{ VALUES ?uri {{ <{uri}> }} ?uri ?kg_p ?kg_o . {fragment} }} }}",
            graph = self.graph_uri(),
        );
        self.sparql_ask(&ask)
    }
}

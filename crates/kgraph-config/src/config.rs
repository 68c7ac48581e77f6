//! Graph configuration types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level configuration for one knowledge graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KGraphConfig {
    pub graph: GraphSection,
    pub vector_store: VectorStoreSection,
    pub projections: ProjectionSection,
}

/// Identity of the graph and the named graph its triples are written to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSection {
    pub id: String,
    pub uri: String,
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            uri: "urn:kgraph:default".to_string(),
        }
    }
}

/// Similarity metric, as written in config files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricConfig {
    #[default]
    Cosine,
    Dot,
    Euclidean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSection {
    /// Collection name, defaults to `<graph id>_vectors` when empty
    pub collection: String,
    pub metric: MetricConfig,
}

impl Default for VectorStoreSection {
    fn default() -> Self {
        Self {
            collection: String::new(),
            metric: MetricConfig::Cosine,
        }
    }
}

/// Projection overrides
///
/// `types` maps a type URI to its projections (`projection id → property
/// URIs`). With `replace_defaults = false` a listed type replaces only that
/// type's built-in projections; with `true` the built-ins are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSection {
    pub replace_defaults: bool,
    pub types: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl KGraphConfig {
    /// Builder: set graph id and URI
    pub fn with_graph(mut self, id: impl Into<String>, uri: impl Into<String>) -> Self {
        self.graph.id = id.into();
        self.graph.uri = uri.into();
        self
    }

    pub fn with_metric(mut self, metric: MetricConfig) -> Self {
        self.vector_store.metric = metric;
        self
    }

    /// Builder: declare one projection override
    pub fn with_projection<I, S>(mut self, type_uri: &str, projection_id: &str, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projections
            .types
            .entry(type_uri.to_string())
            .or_default()
            .insert(
                projection_id.to_string(),
                properties.into_iter().map(Into::into).collect(),
            );
        self
    }

    /// Effective vector collection name
    pub fn collection_name(&self) -> String {
        if self.vector_store.collection.is_empty() {
            format!("{}_vectors", self.graph.id)
        } else {
            self.vector_store.collection.clone()
        }
    }

    /// Reject settings a graph cannot be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.id.trim().is_empty() {
            return Err(ConfigError::validation("graph.id", "must not be empty"));
        }
        if !has_scheme(&self.graph.uri) {
            return Err(ConfigError::validation(
                "graph.uri",
                format!("{:?} is not an absolute IRI", self.graph.uri),
            ));
        }
        for (type_uri, projections) in &self.projections.types {
            for (projection_id, properties) in projections {
                let field = format!("projections.types.{}.{}", type_uri, projection_id);
                if projection_id.trim().is_empty() {
                    return Err(ConfigError::validation(field, "projection id must not be empty"));
                }
                if properties.is_empty() {
                    return Err(ConfigError::validation(field, "property list must not be empty"));
                }
            }
        }
        Ok(())
    }
}

fn has_scheme(uri: &str) -> bool {
    match uri.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && !uri.chars().any(char::is_whitespace)
                && scheme
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

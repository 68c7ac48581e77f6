//! In-memory vector store
//!
//! Records live in a `BTreeMap` behind a `parking_lot::RwLock`; searches are
//! exhaustive scans. Every vector in a store has the provider's dimension.

use std::collections::BTreeMap;
use std::sync::Arc;

use kgraph_core::{DistanceMetric, EmbeddingProvider, Payload, VectorHit, VectorRecord};
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{VectorError, VectorResult};
use crate::filter::VectorFilter;

/// Changes to apply to an existing record
///
/// `text` is embedded unless `vector` is also given. A payload given alone is
/// merged into the existing one; given together with a new vector or text it
/// replaces it.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub vector: Option<Vec<f32>>,
    pub text: Option<String>,
    pub payload: Option<Payload>,
}

impl RecordUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn vector(vector: Vec<f32>) -> Self {
        Self {
            vector: Some(vector),
            ..Default::default()
        }
    }

    pub fn payload(payload: Payload) -> Self {
        Self {
            payload: Some(payload),
            ..Default::default()
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Embedding collection with payload filtering
pub struct VectorStore {
    store_id: String,
    collection: String,
    metric: DistanceMetric,
    dimensions: usize,
    provider: Arc<dyn EmbeddingProvider>,
    records: RwLock<BTreeMap<String, VectorRecord>>,
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("store_id", &self.store_id)
            .field("collection", &self.collection)
            .field("metric", &self.metric)
            .field("dimensions", &self.dimensions)
            .field("model", &self.provider.model_name())
            .finish_non_exhaustive()
    }
}

impl VectorStore {
    /// Create an empty store whose dimension is fixed by the provider
    pub fn new(store_id: impl Into<String>, provider: Arc<dyn EmbeddingProvider>) -> Self {
        let store_id = store_id.into();
        let dimensions = provider.dimensions();
        info!(
            store_id = %store_id,
            model = %provider.model_name(),
            dimensions,
            "Created vector store"
        );
        Self {
            collection: format!("{}_vectors", store_id),
            store_id,
            metric: DistanceMetric::default(),
            dimensions,
            provider,
            records: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    fn check_dimensions(&self, vector: &[f32]) -> VectorResult<()> {
        if vector.len() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        Ok(())
    }

    fn insert(&self, id: Option<String>, vector: Vec<f32>, payload: Payload, text: Option<String>) -> String {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        self.records.write().insert(
            id.clone(),
            VectorRecord {
                id: id.clone(),
                vector,
                payload,
                text,
            },
        );
        id
    }

    /// Embed `text` and store it; an existing record with the same id is replaced
    pub async fn add_text(&self, text: &str, payload: Payload, id: Option<String>) -> VectorResult<String> {
        let vector = self.provider.embed(text).await?;
        self.check_dimensions(&vector)?;
        let id = self.insert(id, vector, payload, Some(text.to_string()));
        debug!(store_id = %self.store_id, id = %id, "Stored text vector");
        Ok(id)
    }

    /// Store a precomputed vector
    pub fn add_vector(&self, vector: Vec<f32>, payload: Payload, id: Option<String>) -> VectorResult<String> {
        self.check_dimensions(&vector)?;
        Ok(self.insert(id, vector, payload, None))
    }

    /// Embed and store several texts with one provider call
    ///
    /// Nothing is stored if embedding fails or any vector has the wrong size.
    pub async fn add_texts(
        &self,
        texts: &[&str],
        payloads: Vec<Payload>,
        ids: Option<Vec<String>>,
    ) -> VectorResult<Vec<String>> {
        if payloads.len() != texts.len() {
            return Err(VectorError::LengthMismatch {
                texts: texts.len(),
                other: payloads.len(),
                what: "payloads",
            });
        }
        if let Some(ids) = &ids {
            if ids.len() != texts.len() {
                return Err(VectorError::LengthMismatch {
                    texts: texts.len(),
                    other: ids.len(),
                    what: "ids",
                });
            }
        }

        let vectors = self.provider.embed_batch(texts).await?;
        if vectors.len() != texts.len() {
            return Err(VectorError::Embedding(format!(
                "provider returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }
        for vector in &vectors {
            self.check_dimensions(vector)?;
        }

        let ids: Vec<Option<String>> = match ids {
            Some(ids) => ids.into_iter().map(Some).collect(),
            None => vec![None; texts.len()],
        };
        let stored = vectors
            .into_iter()
            .zip(payloads)
            .zip(texts)
            .zip(ids)
            .map(|(((vector, payload), text), id)| {
                self.insert(id, vector, payload, Some(text.to_string()))
            })
            .collect::<Vec<_>>();
        debug!(store_id = %self.store_id, count = stored.len(), "Stored text batch");
        Ok(stored)
    }

    /// Embed `text` and rank records against it
    pub async fn search_by_text(
        &self,
        text: &str,
        limit: usize,
        filter: Option<&VectorFilter>,
        score_threshold: Option<f32>,
    ) -> VectorResult<Vec<VectorHit>> {
        let query = self.provider.embed(text).await?;
        self.search_by_vector(&query, limit, filter, score_threshold)
    }

    /// Rank records by similarity to `query`
    ///
    /// Records failing the filter are skipped and the threshold is applied
    /// before `limit`. Equal scores are ordered by id.
    pub fn search_by_vector(
        &self,
        query: &[f32],
        limit: usize,
        filter: Option<&VectorFilter>,
        score_threshold: Option<f32>,
    ) -> VectorResult<Vec<VectorHit>> {
        self.check_dimensions(query)?;

        let records = self.records.read();
        let mut hits: Vec<VectorHit> = records
            .values()
            .filter(|r| filter.map_or(true, |f| f.matches(&r.payload)))
            .map(|r| VectorHit {
                id: r.id.clone(),
                score: self.metric.score(query, &r.vector),
                payload: r.payload.clone(),
            })
            .filter(|hit| score_threshold.map_or(true, |t| hit.score >= t))
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(limit);
        Ok(hits)
    }

    /// Apply an update to an existing record; `false` if the id is unknown
    pub async fn update(&self, id: &str, update: RecordUpdate) -> VectorResult<bool> {
        if !self.records.read().contains_key(id) {
            return Ok(false);
        }

        let vector = match (update.vector, &update.text) {
            (Some(vector), _) => Some(vector),
            (None, Some(text)) => Some(self.provider.embed(text).await?),
            (None, None) => None,
        };
        if let Some(vector) = &vector {
            self.check_dimensions(vector)?;
        }

        let mut records = self.records.write();
        // removed while embedding
        let Some(record) = records.get_mut(id) else {
            return Ok(false);
        };
        let replaces_content = vector.is_some();
        if let Some(vector) = vector {
            record.vector = vector;
            record.text = update.text;
        }
        if let Some(payload) = update.payload {
            if replaces_content {
                record.payload = payload;
            } else {
                record.payload.extend(payload);
            }
        }
        debug!(store_id = %self.store_id, id = %id, "Updated vector record");
        Ok(true)
    }

    /// Remove records by id; unknown ids are ignored. Returns how many were removed.
    pub fn delete<S: AsRef<str>>(&self, ids: &[S]) -> usize {
        let mut records = self.records.write();
        ids.iter()
            .filter(|id| records.remove(id.as_ref()).is_some())
            .count()
    }

    pub fn get_by_id(&self, id: &str) -> Option<VectorRecord> {
        self.records.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.read().contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    pub fn clear(&self) {
        self.records.write().clear();
        info!(store_id = %self.store_id, "Cleared vector store");
    }
}

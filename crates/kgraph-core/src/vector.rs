//! Vector record types shared by the vector store and the graph engine

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary JSON metadata attached to a vector record
pub type Payload = Map<String, Value>;

/// Payload keys written by the graph engine for every projection record
pub mod payload_keys {
    pub const URI: &str = "uri";
    pub const TYPE: &str = "type";
    pub const GRAPH: &str = "graph";
    pub const PROJECTION_ID: &str = "projection_id";
    pub const PROJECTION_PROPERTIES: &str = "projection_properties";
}

/// A stored embedding with its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: Payload,
    /// Source text, when the record was created from text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl VectorRecord {
    /// String payload field
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}

/// One similarity search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    /// Larger is more similar, whatever the metric
    pub score: f32,
    pub payload: Payload,
}

impl VectorHit {
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// The object URI this hit was projected from
    pub fn uri(&self) -> Option<&str> {
        self.payload_str(payload_keys::URI)
    }
}

/// Similarity metric of a vector collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Dot,
    Euclidean,
}

impl DistanceMetric {
    /// Similarity score, oriented so that larger is closer
    ///
    /// Mismatched lengths and zero-norm vectors score 0 under cosine.
    /// Euclidean distance `d` is mapped to `1 / (1 + d)`.
    pub fn score(&self, a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }
        match self {
            Self::Cosine => cosine_similarity(a, b),
            Self::Dot => a.iter().zip(b).map(|(x, y)| x * y).sum(),
            Self::Euclidean => {
                let d: f32 = a
                    .iter()
                    .zip(b)
                    .map(|(x, y)| (x - y) * (x - y))
                    .sum::<f32>()
                    .sqrt();
                1.0 / (1.0 + d)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Dot => "dot",
            Self::Euclidean => "euclidean",
        }
    }
}

/// Cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_metric_orientation() {
        let q = [1.0, 0.0];
        let near = [0.9, 0.1];
        let far = [-1.0, 0.0];
        for metric in [DistanceMetric::Cosine, DistanceMetric::Dot, DistanceMetric::Euclidean] {
            assert!(metric.score(&q, &near) > metric.score(&q, &far), "{:?}", metric);
        }
        assert_eq!(DistanceMetric::Euclidean.score(&q, &q), 1.0);
    }

    #[test]
    fn test_metric_serde() {
        let m: DistanceMetric = serde_json::from_str("\"euclidean\"").unwrap();
        assert_eq!(m, DistanceMetric::Euclidean);
        assert_eq!(DistanceMetric::default().as_str(), "cosine");
    }
}

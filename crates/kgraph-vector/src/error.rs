//! Error types for the vector store

use thiserror::Error;

/// Vector store error type
#[derive(Error, Debug)]
pub enum VectorError {
    /// A vector whose length differs from the collection's
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The embedding provider failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// A filter document that cannot be interpreted
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Batch inputs of different lengths
    #[error("Length mismatch: {texts} texts, {other} {what}")]
    LengthMismatch {
        texts: usize,
        other: usize,
        what: &'static str,
    },
}

/// Result type for vector store operations
pub type VectorResult<T> = Result<T, VectorError>;

impl From<anyhow::Error> for VectorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Embedding(format!("{:#}", err))
    }
}

impl From<VectorError> for kgraph_core::StorageError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::DimensionMismatch { expected, actual } => {
                Self::DimensionMismatch { expected, actual }
            }
            VectorError::Embedding(msg) => Self::Embedding(msg),
            VectorError::InvalidFilter(msg) => Self::Query(msg),
            VectorError::LengthMismatch { .. } => Self::Query(err.to_string()),
        }
    }
}

//! Storage Error Types
//!
//! One taxonomy shared by the triple store, the vector store and the
//! synchronization engine. Backend crates convert their own error types into
//! [`StorageError`] so the engine can log and classify failures uniformly.

use thiserror::Error;

/// Error type for knowledge-graph storage operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// An underlying engine rejected the operation
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Malformed SPARQL or vector filter
    #[error("Query error: {0}")]
    Query(String),

    /// The object adapter could not resolve a type or property
    #[error("Adapter mismatch: {0}")]
    AdapterMismatch(String),

    /// An object without a URI was handed to a write operation
    #[error("Object has no URI")]
    MissingIdentity,

    /// A vector did not match the store's fixed dimensionality
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The embedding provider failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Create a store-unavailable error
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Create a query error
    pub fn query<S: Into<String>>(msg: S) -> Self {
        Self::Query(msg.into())
    }

    /// Create an adapter mismatch error
    pub fn adapter<S: Into<String>>(msg: S) -> Self {
        Self::AdapterMismatch(msg.into())
    }

    /// Check if re-invoking the same call may succeed
    ///
    /// Writes are idempotent (set semantics for quads, deterministic ids for
    /// vectors), so transient failures are safe to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Embedding(_))
    }

    /// Check if the error is a caller precondition violation
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingIdentity)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(StorageError::unavailable("engine closed").is_retryable());
        assert!(StorageError::Embedding("timeout".to_string()).is_retryable());

        assert!(!StorageError::query("unexpected token").is_retryable());
        assert!(!StorageError::MissingIdentity.is_retryable());
    }

    #[test]
    fn test_precondition() {
        assert!(StorageError::MissingIdentity.is_precondition());
        assert!(!StorageError::adapter("no class").is_precondition());
    }

    #[test]
    fn test_dimension_message() {
        let err = StorageError::DimensionMismatch {
            expected: 384,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Vector dimension mismatch: expected 384, got 3"
        );
    }
}

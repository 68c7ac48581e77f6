//! Error types for the triple store

use thiserror::Error;

/// Triple store error type
#[derive(Error, Debug)]
pub enum RdfError {
    /// The engine rejected a read or write
    #[error("Storage error: {0}")]
    Storage(#[from] oxigraph::store::StorageError),

    /// SPARQL text that does not parse, or a query of the wrong form
    #[error("Query error: {0}")]
    Query(String),

    /// A query that parsed but failed to evaluate
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] oxigraph::sparql::EvaluationError),

    /// A document that failed to parse or load
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    /// A string that is not a valid IRI, blank node id or language tag
    #[error("Invalid term: {0}")]
    InvalidTerm(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for triple store operations
pub type RdfResult<T> = Result<T, RdfError>;

impl RdfError {
    pub(crate) fn invalid_term(what: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::InvalidTerm(format!("{}: {}", what, err))
    }
}

impl From<RdfError> for kgraph_core::StorageError {
    fn from(err: RdfError) -> Self {
        match err {
            RdfError::Storage(e) => Self::StoreUnavailable(e.to_string()),
            RdfError::Query(msg) => Self::Query(msg),
            RdfError::Evaluation(e) => Self::Query(e.to_string()),
            RdfError::Parse(msg) => Self::Serialization(format!("Load failed: {}", msg)),
            RdfError::Serialize(msg) => Self::Serialization(msg),
            RdfError::InvalidTerm(msg) => Self::AdapterMismatch(msg),
            RdfError::UnsupportedFormat(msg) => {
                Self::Configuration(format!("Unsupported format: {}", msg))
            }
            RdfError::Io(e) => Self::StoreUnavailable(e.to_string()),
        }
    }
}

//! Kgraph Core - shared model for the knowledge-graph memory layer
//!
//! Defines the types exchanged between the triple store, the vector store and
//! the synchronization engine:
//!
//! - [`term`]: RDF terms, triples and quads, plus their compact string form
//! - [`object`]: the [`GraphObject`] / [`ObjectFactory`] adapter seam
//! - [`projection`]: which properties feed which named vector, per type
//! - [`embedding`]: the [`EmbeddingProvider`] trait
//! - [`vector`]: vector records, hits and similarity metrics
//! - [`ids`]: deterministic vector record ids
//! - [`error`]: the shared [`StorageError`] taxonomy

pub mod embedding;
pub mod error;
pub mod ids;
pub mod object;
pub mod projection;
pub mod term;
pub mod vector;
pub mod vocab;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use embedding::EmbeddingProvider;
pub use error::{StorageError, StorageResult};
pub use ids::vector_record_id;
pub use object::{
    DatatypeHint, GenericObject, GenericObjectFactory, GraphObject, ObjectFactory, PropertyEntry,
    PropertyValue,
};
pub use projection::{projection_text, ProjectionConfig, TypeProjections};
pub use term::{looks_like_uri, Literal, Quad, RdfTerm, Triple};
pub use vector::{cosine_similarity, payload_keys, DistanceMetric, Payload, VectorHit, VectorRecord};

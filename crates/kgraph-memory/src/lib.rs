//! Kgraph Memory - knowledge-graph memory with synchronized projections
//!
//! A [`KGraph`] mirrors every domain object into two stores:
//!
//! - the triple store, for exact structural queries (SPARQL)
//! - the vector store, one embedding per configured projection, for
//!   similarity queries
//!
//! and keeps both consistent as objects are updated or removed. Hybrid
//! search ranks by similarity and then keeps only candidates satisfying a
//! SPARQL graph pattern.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kgraph_core::test_support::MockEmbeddingProvider;
//! use kgraph_core::vocab::vital;
//! use kgraph_core::GenericObject;
//! use kgraph_memory::KGraph;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), kgraph_core::StorageError> {
//! let provider = Arc::new(MockEmbeddingProvider::default());
//! let mut graph = KGraph::new("notes", "http://example.org/graph/notes", provider)?;
//!
//! let note = GenericObject::new("http://example.org/note/1", vital::NODE)
//!     .with(vital::HAS_NAME, "Rust ownership")
//!     .with(vital::HAS_DESCRIPTION, "borrowing and lifetimes");
//! assert!(graph.add_object(&note).await?);
//!
//! let hits = graph.vector_search("ownership", None, 5, None).await;
//! assert_eq!(hits[0].uri(), Some("http://example.org/note/1"));
//! # Ok(())
//! # }
//! ```

mod graph;
mod memory;
mod search;

pub use graph::{GraphStats, KGraph};
pub use memory::KGraphMemory;
pub use search::HybridHit;

// Re-exported so callers need only this crate for common use
pub use kgraph_config::{ConfigLoader, KGraphConfig};
pub use kgraph_core::{GraphObject, ObjectFactory, ProjectionConfig, StorageError, StorageResult};
pub use kgraph_rdf::{LoadSource, QueryOutcome, RdfSerialization};
pub use kgraph_vector::VectorFilter;

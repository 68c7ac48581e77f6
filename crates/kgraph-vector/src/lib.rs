//! Vector store for kgraph
//!
//! Holds one embedding per record alongside a JSON payload. Records are
//! ranked by the collection's [`kgraph_core::DistanceMetric`] and narrowed
//! with [`VectorFilter`] clauses over the payload.

pub mod error;
pub mod filter;
pub mod store;

pub use error::{VectorError, VectorResult};
pub use filter::{FilterCondition, Range, VectorFilter};
pub use store::{RecordUpdate, VectorStore};

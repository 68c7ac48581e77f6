//! Triple store for kgraph
//!
//! An in-memory quad store over `oxigraph` that keeps literal datatypes
//! intact across writes and reads.
//!
//! ## Features
//!
//! - **Set semantics**: duplicate quads are never stored twice
//! - **Typed literals**: adapter hints map to XSD datatypes and decode back
//!   to native values
//! - **SPARQL**: SELECT / CONSTRUCT / ASK / UPDATE
//! - **Bulk load and dump**: N-Triples, Turtle, RDF/XML, N-Quads, TriG
//!
//! ## Usage
//!
//! ```rust
//! use kgraph_core::RdfTerm;
//! use kgraph_rdf::{QuadPattern, TripleStore};
//!
//! # fn main() -> Result<(), kgraph_rdf::RdfError> {
//! let store = TripleStore::new("example")?;
//! let s = RdfTerm::named("http://example.org/a");
//! store.add_quad(&s, "http://example.org/name", &RdfTerm::literal("A"), None)?;
//! assert_eq!(store.get_quads(&QuadPattern::any().subject(s))?.len(), 1);
//! # Ok(())
//! # }
//! ```

mod bulk;
mod convert;
pub mod error;
pub mod format;
pub mod literal;
mod objects;
pub mod query;
pub mod store;

pub use bulk::LoadSource;
pub use convert::validate_iri;
pub use error::{RdfError, RdfResult};
pub use format::RdfSerialization;
pub use literal::decode_term;
pub use query::{ConstructedTriple, QueryOutcome, SelectRow};
pub use store::{QuadPattern, TripleStore};

/// Factory that rebuilds [`kgraph_core::GenericObject`]s with typed values
pub fn generic_factory() -> kgraph_core::GenericObjectFactory {
    kgraph_core::GenericObjectFactory::new(decode_term)
}

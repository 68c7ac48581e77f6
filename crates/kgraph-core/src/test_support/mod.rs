//! Test support utilities
//!
//! Only compiled for tests or with the `test-utils` feature.

pub mod mocks;

pub use mocks::{MockEmbeddingProvider, MOCK_DIMENSIONS};

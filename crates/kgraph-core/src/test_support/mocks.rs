//! Mock Implementations for Testing
//!
//! Deterministic, in-memory stand-ins for the provider traits, with call
//! tracking and error injection.
//!
//! # Mock Embedding Provider
//!
//! ```rust
//! use kgraph_core::test_support::mocks::MockEmbeddingProvider;
//! use kgraph_core::EmbeddingProvider;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = MockEmbeddingProvider::new(64);
//! let a = provider.embed("apple pie").await?;
//! let b = provider.embed("apple pie").await?;
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 64);
//! assert_eq!(provider.call_count(), 2);
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;

/// Dimension used by [`MockEmbeddingProvider::default`]
pub const MOCK_DIMENSIONS: usize = 384;

// ============================================================================
// Mock Embedding Provider
// ============================================================================

/// Bag-of-words embedding provider
///
/// Each lower-cased alphanumeric token is hashed with blake3 into one bucket
/// (with a sign bit) and the resulting vector is L2-normalized. Texts that
/// share words therefore score higher under cosine similarity than texts
/// that do not, which is enough to assert on ranking in tests.
///
/// Text with no tokens embeds to the zero vector.
#[derive(Debug)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
    fail_all: bool,
    fail_on: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new(MOCK_DIMENSIONS)
    }
}

impl MockEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            fail_all: false,
            fail_on: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider whose every call fails
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Builder: fail any text containing `needle`
    pub fn with_failure_on(self, needle: impl Into<String>) -> Self {
        self.set_failure_on(Some(needle.into()));
        self
    }

    /// Change the failure trigger after construction
    pub fn set_failure_on(&self, needle: Option<String>) {
        *self.fail_on.lock().unwrap() = needle;
    }

    /// Number of texts embedded (including failed attempts)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Synchronous embedding, for building query vectors in tests
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vector;
        }

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let digest = blake3::hash(token.to_lowercase().as_bytes());
            let bytes = digest.as_bytes();
            let mut index_bytes = [0u8; 8];
            index_bytes.copy_from_slice(&bytes[..8]);
            let bucket = (u64::from_le_bytes(index_bytes) % self.dimensions as u64) as usize;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }

    fn check_failure(&self, text: &str) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            anyhow::bail!("mock embedding failure");
        }
        if let Some(needle) = self.fail_on.lock().unwrap().as_deref() {
            if text.contains(needle) {
                anyhow::bail!("mock embedding failure on {:?}", needle);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.check_failure(text)?;
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        texts
            .iter()
            .map(|text| {
                self.check_failure(text)?;
                Ok(self.vector_for(text))
            })
            .collect()
    }

    fn model_name(&self) -> &str {
        "mock-bag-of-words"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

//! Embedding provider abstraction
//!
//! Text goes in, a fixed-dimension vector comes out. Implementations may be
//! local models or remote services, hence async.

use async_trait::async_trait;

/// Converts text into embedding vectors
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    /// Embed several texts, preserving order
    ///
    /// The default embeds one at a time; providers with a native batch
    /// endpoint should override it.
    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn model_name(&self) -> &str;

    /// Length of every vector this provider returns
    fn dimensions(&self) -> usize;
}

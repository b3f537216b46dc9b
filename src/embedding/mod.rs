//! Embedding provider seam.
//!
//! The matcher only needs "same text in, same fixed-length vector out". [`HttpEmbeddingProvider`]
//! talks to the model server's `POST /encode`; [`MockEmbeddingProvider`] scripts vectors for tests.

mod error;
/// `reqwest` client for the model server.
pub mod http;
#[cfg(any(test, feature = "mock"))]
/// Scripted provider (enabled with `mock` feature).
pub mod mock;

pub use error::ProviderError;
pub use http::{EncodeRequest, EncodeResponse, HttpEmbeddingProvider};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingProvider;

/// A fixed-length embedding vector.
pub type Embedding = Vec<f32>;

/// Turns a query string into an embedding.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single query. Any failure is reported as [`ProviderError`].
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Embedding, ProviderError>> + Send;
}

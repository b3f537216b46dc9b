use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::{Embedding, EmbeddingProvider, ProviderError};

/// Scripted embedding provider that counts its calls.
///
/// Clones share state, so a test can keep a handle while the matcher owns another.
#[derive(Clone, Default)]
pub struct MockEmbeddingProvider {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    vectors: RwLock<HashMap<String, Embedding>>,
    fallback: RwLock<Option<Embedding>>,
    latency: RwLock<Option<Duration>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `vector` as the embedding of `text`.
    pub fn with_vector(self, text: &str, vector: Vec<f32>) -> Self {
        self.insert(text, vector);
        self
    }

    /// Vector returned for any text without a scripted embedding.
    pub fn with_fallback(self, vector: Vec<f32>) -> Self {
        *self.inner.fallback.write().expect("lock poisoned") = Some(vector);
        self
    }

    /// Delays every call, to widen race windows in concurrency tests.
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.inner.latency.write().expect("lock poisoned") = Some(latency);
        self
    }

    pub fn insert(&self, text: &str, vector: Vec<f32>) {
        self.inner
            .vectors
            .write()
            .expect("lock poisoned")
            .insert(text.to_string(), vector);
    }

    /// Makes every subsequent call fail with [`ProviderError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `embed` calls so far.
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.inner.calls.store(0, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for MockEmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEmbeddingProvider")
            .field("calls", &self.calls())
            .finish()
    }
}

impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Embedding, ProviderError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);

        let latency = *self.inner.latency.read().expect("lock poisoned");
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable {
                reason: "mock provider offline".to_string(),
            });
        }

        let scripted = self
            .inner
            .vectors
            .read()
            .expect("lock poisoned")
            .get(text)
            .cloned();

        scripted
            .or_else(|| self.inner.fallback.read().expect("lock poisoned").clone())
            .ok_or_else(|| ProviderError::Unavailable {
                reason: format!("no scripted embedding for '{text}'"),
            })
    }
}

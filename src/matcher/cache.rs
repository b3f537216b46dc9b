//! Session-scoped memo of resolved matches.
//!
//! Keys are the raw query strings (no normalization). Entries are never evicted or
//! invalidated for the life of the cache.

use std::future::Future;
use std::sync::Arc;

use moka::future::Cache;

use super::types::MatchResult;
use crate::embedding::ProviderError;

/// Why a lookup produced no cacheable result.
///
/// Both outcomes are recomputed on the next call for the same query.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Unresolved {
    #[error("embedding unavailable: {0}")]
    Provider(#[from] ProviderError),

    #[error("best alias score {score} did not exceed the threshold")]
    NotConfident { score: f64 },
}

/// Cloneable handle to a shared match memo.
///
/// Concurrent lookups for the same query coalesce: one caller resolves while the others
/// wait for its outcome.
#[derive(Clone)]
pub struct MatchCache {
    entries: Cache<String, MatchResult>,
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl MatchCache {
    /// Creates an unbounded cache with no expiry.
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }

    pub async fn get(&self, query: &str) -> Option<MatchResult> {
        self.entries.get(query).await
    }

    /// Runs `resolve` at most once per query across concurrent callers.
    ///
    /// `Ok` values are stored; `Err` values are handed to every waiter and then dropped.
    pub(crate) async fn get_or_resolve<F>(
        &self,
        query: &str,
        resolve: F,
    ) -> Result<MatchResult, Arc<Unresolved>>
    where
        F: Future<Output = Result<MatchResult, Unresolved>>,
    {
        self.entries.try_get_with(query.to_string(), resolve).await
    }

    #[inline]
    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    /// Approximate until [`run_pending_tasks`](Self::run_pending_tasks) has run.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }
}

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::cache::{MatchCache, Unresolved};
use super::types::{MatchResult, RankedAlias};
use crate::catalog::CatalogIndex;
use crate::config::Config;
use crate::constants::{DEFAULT_MATCH_THRESHOLD, DEFAULT_PROVIDER_TIMEOUT, validate_embedding_dim};
use crate::embedding::{Embedding, EmbeddingProvider, ProviderError};
use crate::scoring::{AliasScorer, MatchDecision, ScoredAlias, score_all};

#[cfg(any(test, feature = "mock"))]
use crate::embedding::MockEmbeddingProvider;

/// Tunables for a [`Matcher`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// Similarity the best alias must strictly exceed.
    pub threshold: f64,
    /// Upper bound on a single embedding call.
    pub provider_timeout: Duration,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

impl MatchPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            threshold: config.match_threshold,
            provider_timeout: config.provider_timeout,
        }
    }
}

/// Maps free-text item types onto the catalog.
///
/// Holds a read-only [`CatalogIndex`], an [`EmbeddingProvider`], and a [`MatchCache`].
/// The cache may be shared between matchers to scope memoization to a session.
pub struct Matcher<P: EmbeddingProvider> {
    index: Arc<CatalogIndex>,
    provider: P,
    cache: MatchCache,
    scorer: AliasScorer,
    provider_timeout: Duration,
}

impl<P: EmbeddingProvider> std::fmt::Debug for Matcher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("index", &self.index)
            .field("cache", &self.cache)
            .field("threshold", &self.scorer.threshold())
            .field("provider_timeout", &self.provider_timeout)
            .finish()
    }
}

impl<P: EmbeddingProvider> Matcher<P> {
    /// Matcher with a fresh cache and default policy.
    pub fn new(index: Arc<CatalogIndex>, provider: P) -> Self {
        Self::with_cache(index, provider, MatchCache::new(), MatchPolicy::default())
    }

    pub fn with_cache(
        index: Arc<CatalogIndex>,
        provider: P,
        cache: MatchCache,
        policy: MatchPolicy,
    ) -> Self {
        Self {
            index,
            provider,
            cache,
            scorer: AliasScorer::new(policy.threshold),
            provider_timeout: policy.provider_timeout,
        }
    }

    pub fn index(&self) -> &Arc<CatalogIndex> {
        &self.index
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &MatchCache {
        &self.cache
    }

    pub fn threshold(&self) -> f64 {
        self.scorer.threshold()
    }

    /// Maps `query` to a catalog `(display name, code)`.
    ///
    /// Never fails: a provider failure yields [`MatchResult::empty`] and a best score at
    /// or below the threshold yields [`MatchResult::fallback`]. Only resolved results are
    /// memoized, so both of those are recomputed on the next call.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn find_closest_match(&self, query: &str) -> MatchResult {
        if let Some(hit) = self.cache.get(query).await {
            debug!("Match cache hit");
            return hit;
        }

        match self.cache.get_or_resolve(query, self.resolve(query)).await {
            Ok(result) => result,
            Err(unresolved) => match unresolved.as_ref() {
                Unresolved::Provider(_) => MatchResult::empty(),
                Unresolved::NotConfident { .. } => MatchResult::fallback(),
            },
        }
    }

    /// Top `k` aliases by similarity, descending, ties in catalog order.
    ///
    /// Bypasses the cache and surfaces provider failures to the caller.
    #[instrument(skip(self, query), fields(query_len = query.len(), k = k))]
    pub async fn rank(&self, query: &str, k: usize) -> Result<Vec<RankedAlias>, ProviderError> {
        let embedding = self.embed_query(query).await?;
        let scores = score_all(&self.index, &embedding);

        let ranked = AliasScorer::top_k(&scores, k)
            .into_iter()
            .map(|scored| {
                let alias = self.index.alias(scored.index).unwrap_or_default();
                let code = self.index.code_for_alias(alias).unwrap_or_default();
                let display_name = self.index.display_name_for_code(code).unwrap_or_default();
                RankedAlias {
                    alias: alias.to_string(),
                    code: code.to_string(),
                    display_name: display_name.to_string(),
                    score: scored.score,
                }
            })
            .collect::<Vec<_>>();

        debug!(returned = ranked.len(), "Ranked aliases");
        Ok(ranked)
    }

    async fn resolve(&self, query: &str) -> Result<MatchResult, Unresolved> {
        let embedding = self.embed_query(query).await?;
        let scores = score_all(&self.index, &embedding);

        match self.scorer.decide(&scores) {
            MatchDecision::Confident(best) => Ok(self.entry_for(best)),
            MatchDecision::NotConfident(best) => {
                debug!(best_score = best.score, "No alias above threshold, using fallback");
                Err(Unresolved::NotConfident { score: best.score })
            }
            MatchDecision::NoCandidates => Err(Unresolved::NotConfident {
                score: f64::NEG_INFINITY,
            }),
        }
    }

    async fn embed_query(&self, query: &str) -> Result<Embedding, ProviderError> {
        let outcome = tokio::time::timeout(self.provider_timeout, self.provider.embed(query))
            .await
            .unwrap_or(Err(ProviderError::Timeout));

        let embedding = outcome.inspect_err(|e| {
            warn!(error = %e, "Embedding provider failed");
        })?;

        let expected = self.index.dimension();
        if validate_embedding_dim(embedding.len(), expected).is_err() {
            let err = ProviderError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            };
            warn!(error = %err, "Embedding provider returned unusable vector");
            return Err(err);
        }

        Ok(embedding)
    }

    fn entry_for(&self, best: ScoredAlias) -> MatchResult {
        let alias = self.index.alias(best.index).unwrap_or_default();

        let code = self.index.code_for_alias(alias).unwrap_or_else(|| {
            warn!(alias, "Matched alias has no catalog code");
            ""
        });
        let display_name = self.index.display_name_for_code(code).unwrap_or_else(|| {
            warn!(code, "Catalog code has no display name");
            ""
        });

        info!(alias, code, score = best.score, "Resolved item type");
        MatchResult::new(display_name, code)
    }
}

#[cfg(any(test, feature = "mock"))]
pub type MockMatcher = Matcher<MockEmbeddingProvider>;

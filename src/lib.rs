//! Lost-item type matcher library crate (used by the server and integration tests).
//!
//! Maps a free-text item description onto a fixed catalog of `(display name, code)`
//! entries by embedding the text and comparing it against precomputed alias embeddings.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Service configuration
//! - [`CatalogIndex`], [`LoadError`] - Read-only alias catalog and its loader
//! - [`Matcher`], [`MatchResult`], [`MatchStatus`] - Matching and its outcomes
//! - [`MatchCache`] - Session-scoped memo shared between matchers
//!
//! ## Embedding & Scoring
//! - [`EmbeddingProvider`], [`HttpEmbeddingProvider`] - Query embedding
//! - [`AliasScorer`], [`cosine_similarity`] - Similarity and the threshold decision
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod matcher;
pub mod scoring;

pub use catalog::{CatalogEntry, CatalogIndex, CatalogSnapshot, LoadError, LoadResult};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_MATCH_THRESHOLD, DEFAULT_PROVIDER_TIMEOUT, DEFAULT_RANK_K, DimValidationError,
    FALLBACK_CODE, FALLBACK_DISPLAY_NAME, MAX_RANK_K, validate_embedding_dim,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingProvider;
pub use embedding::{
    EncodeRequest, EncodeResponse, Embedding, EmbeddingProvider, HttpEmbeddingProvider,
    ProviderError,
};
#[cfg(any(test, feature = "mock"))]
pub use matcher::MockMatcher;
pub use matcher::{
    MATCH_STATUS_HEADER, MatchCache, MatchPolicy, MatchResult, MatchStatus, Matcher, RankedAlias,
};
pub use scoring::{AliasScorer, MatchDecision, ScoredAlias, cosine_similarity, score_all};

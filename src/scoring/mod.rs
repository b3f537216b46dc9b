//! Alias scoring: cosine similarity against the catalog and the threshold decision.
//!
//! Scores are computed for every alias (the vocabulary is small and bounded), the first
//! maximizer wins, and [`AliasScorer`] accepts it only when its score is strictly above
//! the threshold.

pub mod scorer;
pub mod similarity;
pub mod types;


pub use scorer::AliasScorer;
pub use similarity::{cosine_similarity, score_all};
pub use types::{MatchDecision, ScoredAlias};

use std::cmp::Ordering;

use tracing::debug;

use super::types::{MatchDecision, ScoredAlias};
use crate::constants::DEFAULT_MATCH_THRESHOLD;

/// Picks the best alias from a score vector and applies the confidence threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AliasScorer {
    threshold: f64,
}

impl Default for AliasScorer {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}

impl AliasScorer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Strictly greater than the threshold; a score equal to it is not confident.
    #[inline]
    pub fn is_confident(&self, score: f64) -> bool {
        score > self.threshold
    }

    /// First maximizer over `scores`; `None` when empty.
    pub fn best(scores: &[f64]) -> Option<ScoredAlias> {
        let mut iter = scores.iter().copied().enumerate();
        let (first_index, first_score) = iter.next()?;

        let mut best = ScoredAlias {
            index: first_index,
            score: first_score,
        };
        for (index, score) in iter {
            if score > best.score {
                best = ScoredAlias { index, score };
            }
        }

        Some(best)
    }

    pub fn decide(&self, scores: &[f64]) -> MatchDecision {
        let Some(best) = Self::best(scores) else {
            debug!("No alias scores to decide on");
            return MatchDecision::NoCandidates;
        };

        debug!(
            score = best.score,
            index = best.index,
            threshold = self.threshold,
            "Best alias scored"
        );

        if self.is_confident(best.score) {
            MatchDecision::Confident(best)
        } else {
            MatchDecision::NotConfident(best)
        }
    }

    /// The `k` highest scores, descending; equal scores keep alias order.
    pub fn top_k(scores: &[f64], k: usize) -> Vec<ScoredAlias> {
        let mut ranked: Vec<ScoredAlias> = scores
            .iter()
            .copied()
            .enumerate()
            .map(|(index, score)| ScoredAlias { index, score })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(k);
        ranked
    }
}

/// An alias position in the catalog with its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredAlias {
    /// Position in [`CatalogIndex::aliases`](crate::catalog::CatalogIndex::aliases).
    pub index: usize,
    /// Cosine similarity to the query.
    pub score: f64,
}

/// Outcome of the threshold decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchDecision {
    /// Best alias scored strictly above the threshold.
    Confident(ScoredAlias),
    /// Best alias scored at or below the threshold.
    NotConfident(ScoredAlias),
    /// There was nothing to score.
    NoCandidates,
}

impl MatchDecision {
    /// The best alias, confident or not.
    pub fn best(&self) -> Option<ScoredAlias> {
        match self {
            MatchDecision::Confident(best) | MatchDecision::NotConfident(best) => Some(*best),
            MatchDecision::NoCandidates => None,
        }
    }

    pub fn is_confident(&self) -> bool {
        matches!(self, MatchDecision::Confident(_))
    }
}

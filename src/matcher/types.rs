use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_CODE, FALLBACK_DISPLAY_NAME};

pub const MATCH_STATUS_HEADER: &str = "X-Match-Status";

/// Canonical catalog entry chosen for a free-text item type.
///
/// Three shapes exist: a resolved `(display name, code)` pair, the fallback
/// `("Not Listed", "217")`, and the empty pair when the embedding provider failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub display_name: String,
    pub code: String,
}

impl MatchResult {
    pub fn new(display_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            code: code.into(),
        }
    }

    /// Returned when no embedding could be obtained for the query.
    pub fn empty() -> Self {
        Self::new("", "")
    }

    /// Returned when no alias is similar enough.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_DISPLAY_NAME, FALLBACK_CODE)
    }

    pub fn status(&self) -> MatchStatus {
        if self.display_name.is_empty() && self.code.is_empty() {
            MatchStatus::Unavailable
        } else if self.display_name == FALLBACK_DISPLAY_NAME && self.code == FALLBACK_CODE {
            MatchStatus::NotListed
        } else {
            MatchStatus::Resolved
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.status() == MatchStatus::Resolved
    }

    pub fn into_pair(self) -> (String, String) {
        (self.display_name, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Resolved,
    NotListed,
    Unavailable,
}

impl MatchStatus {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            MatchStatus::Resolved => "RESOLVED",
            MatchStatus::NotListed => "NOT_LISTED",
            MatchStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}

/// One row of a ranked candidate listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlias {
    pub alias: String,
    pub code: String,
    pub display_name: String,
    pub score: f64,
}

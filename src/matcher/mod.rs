//! Free-text item type to catalog entry matching.
//!
//! [`Matcher::find_closest_match`] embeds the query, scores it against every alias,
//! and maps the best alias through its code to a display name. Results are memoized in
//! a [`MatchCache`] keyed by the raw query.

pub mod cache;
pub mod engine;
pub mod types;


pub use cache::MatchCache;
#[cfg(any(test, feature = "mock"))]
pub use engine::MockMatcher;
pub use engine::{MatchPolicy, Matcher};
pub use types::{MATCH_STATUS_HEADER, MatchResult, MatchStatus, RankedAlias};

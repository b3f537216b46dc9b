//! Cross-cutting, shared constants.
//!
//! The fallback pair and the default threshold are part of the matching contract: downstream
//! consumers compare against [`FALLBACK_CODE`] and [`FALLBACK_DISPLAY_NAME`] literally.

use std::time::Duration;

/// Similarity a best alias must strictly exceed to be accepted.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Display name returned when no alias is confident enough.
pub const FALLBACK_DISPLAY_NAME: &str = "Not Listed";

/// Catalog code returned when no alias is confident enough.
pub const FALLBACK_CODE: &str = "217";

/// Upper bound on a single embedding-provider round trip.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of candidates listed by the ranking API when none is requested.
pub const DEFAULT_RANK_K: usize = 5;

/// Largest `k` accepted by the ranking API.
pub const MAX_RANK_K: usize = 100;

/// Error returned when an embedding does not have the catalog's dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Use this where a provider vector meets the catalog matrix, so a model swap on the
/// provider side shows up as an error instead of a silent zip over the shorter vector.
///
/// # Example
///
/// ```
/// use lostitem::constants::validate_embedding_dim;
///
/// validate_embedding_dim(384, 384).unwrap();
/// assert!(validate_embedding_dim(768, 384).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

use thiserror::Error;

/// Embedding provider failures. The matcher never caches a result produced under one.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("embedding provider unreachable: {reason}")]
    Unavailable { reason: String },

    #[error("embedding provider timed out")]
    Timeout,

    #[error("embedding provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed embedding response: {reason}")]
    MalformedResponse { reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if let Some(status) = err.status() {
            ProviderError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ProviderError::MalformedResponse {
                reason: err.to_string(),
            }
        } else {
            ProviderError::Unavailable {
                reason: err.to_string(),
            }
        }
    }
}

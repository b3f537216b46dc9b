//! Catalog load error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort catalog loading. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Catalog path is neither a directory nor a file.
    #[error("catalog not found at {path}")]
    NotFound { path: PathBuf },

    /// An artifact could not be read.
    #[error("failed to read catalog artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON artifact could not be decoded.
    #[error("failed to parse catalog artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A packed snapshot could not be encoded or decoded.
    #[error("invalid catalog snapshot {path}: {reason}")]
    Snapshot { path: PathBuf, reason: String },

    /// Alias list and embedding matrix are not positionally aligned.
    #[error("catalog misaligned: {aliases} aliases but {embeddings} embeddings")]
    LengthMismatch { aliases: usize, embeddings: usize },

    /// An embedding row does not share the first row's dimension.
    #[error("embedding row {row} has dimension {actual}, expected {expected}")]
    RaggedEmbeddings {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Embeddings have no components.
    #[error("alias embeddings have zero dimension")]
    ZeroDimension,

    /// An embedding row contains NaN or infinity.
    #[error("embedding row {row} contains a non-finite value")]
    NonFiniteEmbedding { row: usize },

    /// The same alias appears twice in the alias list.
    #[error("duplicate alias '{alias}'")]
    DuplicateAlias { alias: String },

    /// The catalog holds no aliases.
    #[error("catalog contains no aliases")]
    Empty,
}

pub type LoadResult<T> = Result<T, LoadError>;

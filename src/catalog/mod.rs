//! Immutable catalog index: aliases, their embeddings, and the code/name maps.
//!
//! # Alignment
//!
//! `aliases()[i]` and `embedding(i)` describe the same alias. Every constructor
//! checks the two sequences have the same length, so a [`CatalogIndex`] that exists
//! is aligned. Nothing mutates the index after construction; share it with `Arc`.
//!
//! # On-disk formats
//!
//! - a directory holding [`ALIASES_FILE`], [`EMBEDDINGS_FILE`], [`ALIAS_TO_CODE_FILE`]
//!   and [`CODE_TO_NAME_FILE`] as JSON;
//! - a packed `rkyv` snapshot file written by [`CatalogIndex::write_snapshot`].

pub mod error;
pub mod index;
pub mod snapshot;


pub use error::{LoadError, LoadResult};
pub use index::{CatalogEntry, CatalogIndex};
pub use snapshot::CatalogSnapshot;

/// Ordered alias list (JSON array of strings).
pub const ALIASES_FILE: &str = "aliases.json";
/// Alias embedding matrix (JSON array of float arrays), aligned with [`ALIASES_FILE`].
pub const EMBEDDINGS_FILE: &str = "alias_embeddings.json";
/// Alias → catalog code (JSON object).
pub const ALIAS_TO_CODE_FILE: &str = "alias_to_code.json";
/// Catalog code → display name (JSON object).
pub const CODE_TO_NAME_FILE: &str = "code_to_name.json";

//! Packed catalog snapshot (`rkyv`).
//!
//! Maps are stored as sorted pair lists so snapshots of the same catalog are byte-identical.

use std::fs;
use std::path::Path;

use rkyv::rancor::Error as RkyvError;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

use super::error::{LoadError, LoadResult};

/// The four catalog structures in one archive.
#[derive(Archive, Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct CatalogSnapshot {
    /// Aliases in stored order.
    pub aliases: Vec<String>,
    /// One embedding per alias, same order as `aliases`.
    pub embeddings: Vec<Vec<f32>>,
    /// Alias → code pairs, sorted by alias.
    pub alias_codes: Vec<AliasCode>,
    /// Code → display name pairs, sorted by code.
    pub entries: Vec<SnapshotEntry>,
}

#[derive(Archive, Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct AliasCode {
    pub alias: String,
    pub code: String,
}

#[derive(Archive, Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct SnapshotEntry {
    pub code: String,
    pub display_name: String,
}

pub(crate) fn write(path: &Path, snapshot: &CatalogSnapshot) -> LoadResult<()> {
    let bytes = rkyv::to_bytes::<RkyvError>(snapshot).map_err(|e| LoadError::Snapshot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    fs::write(path, &bytes).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read(path: &Path) -> LoadResult<CatalogSnapshot> {
    let raw = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Archived data must be aligned before validation; a plain Vec<u8> gives no guarantee.
    let mut aligned = AlignedVec::<16>::with_capacity(raw.len());
    aligned.extend_from_slice(&raw);

    rkyv::from_bytes::<CatalogSnapshot, RkyvError>(&aligned).map_err(|e| LoadError::Snapshot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

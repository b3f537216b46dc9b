use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::error::{LoadError, LoadResult};
use super::snapshot::{self, AliasCode, CatalogSnapshot, SnapshotEntry};
use super::{ALIAS_TO_CODE_FILE, ALIASES_FILE, CODE_TO_NAME_FILE, EMBEDDINGS_FILE};
use crate::scoring::similarity::norm;

/// One canonical catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Opaque, stable category code.
    pub code: String,
    /// Human-readable canonical name.
    pub display_name: String,
}

/// Aliases, their embeddings (row-major), and the alias → code → name maps.
pub struct CatalogIndex {
    aliases: Vec<String>,
    embeddings: Vec<f32>,
    norms: Vec<f64>,
    dimension: usize,
    alias_to_code: HashMap<String, String>,
    code_to_name: HashMap<String, String>,
}

impl std::fmt::Debug for CatalogIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogIndex")
            .field("aliases", &self.aliases.len())
            .field("dimension", &self.dimension)
            .field("codes", &self.code_to_name.len())
            .finish()
    }
}

impl CatalogIndex {
    /// Loads a catalog from a JSON artifact directory or a packed snapshot file.
    pub fn load(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let started = Instant::now();

        let index = if path.is_dir() {
            Self::load_dir(path)?
        } else if path.is_file() {
            Self::from_snapshot(snapshot::read(path)?)?
        } else {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        };

        info!(
            path = %path.display(),
            aliases = index.len(),
            dimension = index.dimension,
            codes = index.code_to_name.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog loaded"
        );

        Ok(index)
    }

    fn load_dir(dir: &Path) -> LoadResult<Self> {
        let aliases: Vec<String> = read_json(&dir.join(ALIASES_FILE))?;
        let embeddings: Vec<Vec<f32>> = read_json(&dir.join(EMBEDDINGS_FILE))?;
        let alias_to_code: HashMap<String, String> = read_json(&dir.join(ALIAS_TO_CODE_FILE))?;
        let code_to_name: HashMap<String, String> = read_json(&dir.join(CODE_TO_NAME_FILE))?;

        Self::from_parts(aliases, embeddings, alias_to_code, code_to_name)
    }

    /// Builds an index from in-memory parts, applying the same checks as [`load`](Self::load).
    pub fn from_parts(
        aliases: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        alias_to_code: HashMap<String, String>,
        code_to_name: HashMap<String, String>,
    ) -> LoadResult<Self> {
        if aliases.len() != embeddings.len() {
            return Err(LoadError::LengthMismatch {
                aliases: aliases.len(),
                embeddings: embeddings.len(),
            });
        }
        if aliases.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut seen = HashSet::with_capacity(aliases.len());
        for alias in &aliases {
            if !seen.insert(alias.as_str()) {
                return Err(LoadError::DuplicateAlias {
                    alias: alias.clone(),
                });
            }
        }

        let dimension = embeddings[0].len();
        if dimension == 0 {
            return Err(LoadError::ZeroDimension);
        }

        let mut flat = Vec::with_capacity(dimension * embeddings.len());
        let mut norms = Vec::with_capacity(embeddings.len());
        for (row, values) in embeddings.iter().enumerate() {
            if values.len() != dimension {
                return Err(LoadError::RaggedEmbeddings {
                    row,
                    expected: dimension,
                    actual: values.len(),
                });
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(LoadError::NonFiniteEmbedding { row });
            }
            norms.push(norm(values));
            flat.extend_from_slice(values);
        }

        let unmapped = aliases
            .iter()
            .filter(|a| !alias_to_code.contains_key(a.as_str()))
            .count();
        if unmapped > 0 {
            warn!(unmapped, "Aliases without a catalog code will resolve to an empty code");
        }

        let unnamed = alias_to_code
            .values()
            .filter(|code| !code_to_name.contains_key(code.as_str()))
            .collect::<HashSet<_>>()
            .len();
        if unnamed > 0 {
            warn!(unnamed, "Catalog codes without a display name will resolve to an empty name");
        }

        Ok(Self {
            aliases,
            embeddings: flat,
            norms,
            dimension,
            alias_to_code,
            code_to_name,
        })
    }

    /// Number of aliases (and embedding rows).
    #[inline]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Always `false` for a constructed index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Embedding dimension shared by every alias.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Aliases in stored order.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[inline]
    pub fn alias(&self, index: usize) -> Option<&str> {
        self.aliases.get(index).map(String::as_str)
    }

    /// Embedding row for the alias at `index`.
    #[inline]
    pub fn embedding(&self, index: usize) -> Option<&[f32]> {
        if index >= self.aliases.len() {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.embeddings[start..start + self.dimension])
    }

    /// Iterates `(embedding, norm)` pairs in alias order.
    pub fn rows(&self) -> impl Iterator<Item = (&[f32], f64)> {
        self.embeddings
            .chunks_exact(self.dimension)
            .zip(self.norms.iter().copied())
    }

    pub fn code_for_alias(&self, alias: &str) -> Option<&str> {
        self.alias_to_code.get(alias).map(String::as_str)
    }

    pub fn display_name_for_code(&self, code: &str) -> Option<&str> {
        self.code_to_name.get(code).map(String::as_str)
    }

    /// Catalog entries (code → display name), sorted by code.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .code_to_name
            .iter()
            .map(|(code, name)| CatalogEntry {
                code: code.clone(),
                display_name: name.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }

    /// Writes the index as a packed `rkyv` snapshot.
    pub fn write_snapshot(&self, path: impl AsRef<Path>) -> LoadResult<()> {
        snapshot::write(path.as_ref(), &self.to_snapshot())
    }

    pub(crate) fn to_snapshot(&self) -> CatalogSnapshot {
        let mut alias_codes: Vec<AliasCode> = self
            .alias_to_code
            .iter()
            .map(|(alias, code)| AliasCode {
                alias: alias.clone(),
                code: code.clone(),
            })
            .collect();
        alias_codes.sort_by(|a, b| a.alias.cmp(&b.alias));

        let entries = self
            .entries()
            .into_iter()
            .map(|e| SnapshotEntry {
                code: e.code,
                display_name: e.display_name,
            })
            .collect();

        CatalogSnapshot {
            aliases: self.aliases.clone(),
            embeddings: self
                .embeddings
                .chunks_exact(self.dimension)
                .map(<[f32]>::to_vec)
                .collect(),
            alias_codes,
            entries,
        }
    }

    pub(crate) fn from_snapshot(snapshot: CatalogSnapshot) -> LoadResult<Self> {
        let alias_to_code = snapshot
            .alias_codes
            .into_iter()
            .map(|ac| (ac.alias, ac.code))
            .collect();
        let code_to_name = snapshot
            .entries
            .into_iter()
            .map(|e| (e.code, e.display_name))
            .collect();

        Self::from_parts(
            snapshot.aliases,
            snapshot.embeddings,
            alias_to_code,
            code_to_name,
        )
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

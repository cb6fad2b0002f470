//! Per-file cache entries and their persistence.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tangle_config::TangleConfig;
use tangle_graph::{ModuleGraph, Node};

use super::{CacheError, CacheResult, config_fingerprint};
use crate::paths::{NodeIds, to_relative_specifier};
use crate::runtime::{Runtime, RuntimeError};

/// What was recorded for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Content hash at the time the file was read.
    pub hash: String,
    pub value: Node,
}

/// On-disk shape of the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheFile {
    /// Fingerprint of the configuration the entries were computed with.
    pub configuration_hash: String,
    pub source_files: IndexMap<String, CacheEntry>,
}

/// Cache state for one run.
///
/// Loaded once before traversal, consulted and staged into while files are
/// visited, and saved once afterwards.
#[derive(Debug)]
pub struct IncrementalCache {
    path: PathBuf,
    fingerprint: String,
    entries: IndexMap<String, CacheEntry>,
    staged: IndexMap<String, String>,
}

impl IncrementalCache {
    /// Load the cache at `path` for a run with `config`.
    pub async fn load(runtime: &dyn Runtime, path: PathBuf, config: &TangleConfig) -> Self {
        let fingerprint = match config_fingerprint(config) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                tracing::warn!(error = %e, "incremental cache disabled for this run");
                String::new()
            }
        };

        let entries = match Self::read(runtime, &path, &fingerprint).await {
            Ok(entries) => {
                tracing::debug!(path = %path.display(), entries = entries.len(), "cache loaded");
                entries
            }
            Err(CacheError::Read(RuntimeError::FileNotFound(_))) => {
                tracing::debug!(path = %path.display(), "no cache file yet");
                IndexMap::new()
            }
            Err(CacheError::ConfigurationChanged) => {
                tracing::info!("configuration changed, discarding cache");
                IndexMap::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding unusable cache");
                IndexMap::new()
            }
        };

        Self {
            path,
            fingerprint,
            entries,
            staged: IndexMap::new(),
        }
    }

    async fn read(
        runtime: &dyn Runtime,
        path: &Path,
        fingerprint: &str,
    ) -> CacheResult<IndexMap<String, CacheEntry>> {
        let text = runtime
            .read_to_string(path)
            .await
            .map_err(CacheError::Read)?;
        let file: CacheFile = serde_json::from_str(&text).map_err(CacheError::Parse)?;

        if fingerprint.is_empty() || file.configuration_hash != fingerprint {
            return Err(CacheError::ConfigurationChanged);
        }
        Ok(file.source_files)
    }

    /// Whether `id` was cached with exactly this content hash.
    pub fn is_unaffected(&self, id: &str, hash: &str) -> bool {
        self.entries.get(id).is_some_and(|entry| entry.hash == hash)
    }

    /// Specifiers that reproduce the cached result for `id`.
    ///
    /// Cached edges are turned back into `./` or `../` specifiers relative to
    /// `file_dir`, the directory of the file being restored, followed by the
    /// cached third-party and builtin names.
    pub fn restore(&self, id: &str, ids: &NodeIds, file_dir: &Path) -> Option<Vec<String>> {
        let entry = self.entries.get(id)?;
        let node = &entry.value;

        let mut specifiers: Vec<String> = node
            .adjacent_to
            .iter()
            .map(|child| to_relative_specifier(file_dir, &ids.to_path(child)))
            .collect();
        specifiers.extend(node.body.third_party_dependencies.iter().cloned());
        specifiers.extend(node.body.builtin_dependencies.iter().cloned());
        Some(specifiers)
    }

    /// Remember the content hash `id` was read with, for [`save`](Self::save).
    pub fn stage(&mut self, id: &str, hash: &str) {
        self.staged.insert(id.to_string(), hash.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist every staged file that made it into `graph`. Failures are logged.
    pub async fn save(&self, runtime: &dyn Runtime, graph: &ModuleGraph) {
        match self.try_save(runtime, graph).await {
            Ok(count) => {
                tracing::debug!(path = %self.path.display(), entries = count, "cache saved")
            }
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to save cache"),
        }
    }

    async fn try_save(&self, runtime: &dyn Runtime, graph: &ModuleGraph) -> CacheResult<usize> {
        let source_files: IndexMap<String, CacheEntry> = self
            .staged
            .iter()
            .filter_map(|(id, hash)| {
                graph.node(id).map(|node| {
                    (
                        id.clone(),
                        CacheEntry {
                            hash: hash.clone(),
                            value: node.clone(),
                        },
                    )
                })
            })
            .collect();
        let count = source_files.len();

        let file = CacheFile {
            configuration_hash: self.fingerprint.clone(),
            source_files,
        };
        let json = serde_json::to_string(&file).map_err(CacheError::Serialize)?;

        if let Some(dir) = self.path.parent() {
            if !runtime.exists(dir) {
                runtime
                    .create_dir(dir, true)
                    .await
                    .map_err(CacheError::Write)?;
            }
        }
        runtime
            .write_file(&self.path, json.as_bytes())
            .await
            .map_err(CacheError::Write)?;
        Ok(count)
    }
}

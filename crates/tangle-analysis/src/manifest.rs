//! `package.json` reading for the unused-dependency query.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{AnalyzeError, Result};
use crate::runtime::{Runtime, RuntimeError};

/// Maximum accepted manifest size (10MB).
const MAX_PACKAGE_JSON_SIZE: u64 = 10 * 1024 * 1024;

/// Dependency fields of a `package.json`, in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageJson {
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: IndexMap<String, String>,
    /// File path this was loaded from
    #[serde(skip)]
    pub path: PathBuf,
}

impl PackageJson {
    /// Load the manifest at `path`.
    ///
    /// A missing file is [`AnalyzeError::ManifestNotFound`]; unreadable or
    /// malformed content is [`AnalyzeError::InvalidManifest`].
    pub async fn from_path(runtime: &dyn Runtime, path: &Path) -> Result<Self> {
        let invalid = |reason: String| AnalyzeError::InvalidManifest {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = runtime.metadata(path).await.map_err(|e| match e {
            RuntimeError::FileNotFound(_) => AnalyzeError::ManifestNotFound(path.to_path_buf()),
            other => invalid(other.to_string()),
        })?;
        if !metadata.is_file {
            return Err(AnalyzeError::ManifestNotFound(path.to_path_buf()));
        }
        if metadata.size > MAX_PACKAGE_JSON_SIZE {
            return Err(invalid(format!(
                "exceeds maximum size of {}MB",
                MAX_PACKAGE_JSON_SIZE / 1024 / 1024
            )));
        }

        let content = runtime
            .read_to_string(path)
            .await
            .map_err(|e| invalid(e.to_string()))?;
        let mut pkg: PackageJson =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        pkg.path = path.to_path_buf();
        Ok(pkg)
    }

    /// `dependencies` then `devDependencies`, each in declaration order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
    }
}

/// Top-level package of a bare specifier (`lodash/fp` → `lodash`,
/// `@scope/pkg/deep` → `@scope/pkg`).
pub fn extract_package_name(specifier: &str) -> &str {
    if specifier.is_empty() {
        return specifier;
    }

    // Scoped packages keep "@scope/name"
    if specifier.starts_with('@') {
        if let Some(first_slash) = specifier.find('/') {
            if let Some(second_slash) = specifier[first_slash + 1..].find('/') {
                return &specifier[..first_slash + 1 + second_slash];
            }
        }
        return specifier;
    }

    match specifier.find('/') {
        Some(slash) => &specifier[..slash],
        None => specifier,
    }
}

/// External source of unused dependencies the import graph cannot see,
/// such as `devDependencies` checked against scripts and tool configs.
///
/// Its results are appended to the graph-based ones.
#[async_trait]
pub trait UnusedDependencyFinder: Send + Sync {
    async fn find_unused(&self, manifest: &PackageJson) -> Vec<String>;
}

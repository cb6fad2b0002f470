//! The analysis configuration and its defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};

/// File extensions followed by default.
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &[".js", ".ts", ".jsx", ".tsx", ".mjs", ".cjs"];

/// Default manifest file name, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "package.json";

/// Default TypeScript project configuration, relative to the working directory.
pub const DEFAULT_TS_CONFIG_PATH: &str = "tsconfig.json";

/// Options for one analysis run.
///
/// Field names are snake_case in TOML and environment variables; the
/// camelCase spellings used in `package.json` are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TangleConfig {
    /// File to start from. When absent, every supported file under the scan
    /// root is analyzed.
    pub entrypoint: Option<PathBuf>,

    /// Maximum path length explored by cycle detection. `None` is unbounded.
    #[serde(alias = "circularMaxDepth")]
    pub circular_max_depth: Option<usize>,

    /// Which non-local references are recorded on nodes.
    #[serde(alias = "dependencyTracking")]
    pub dependency_tracking: DependencyTracking,

    /// Extensions (with leading dot) of files the analysis follows.
    #[serde(alias = "fileExtensions")]
    pub file_extensions: Vec<String>,

    /// Express node ids relative to the working directory instead of the
    /// base directory.
    #[serde(alias = "includeBaseDir")]
    pub include_base_dir: bool,

    /// Reuse results of unchanged files from the previous run.
    pub incremental: bool,

    /// Manifest used by the unused dependency query.
    #[serde(alias = "manifestPath")]
    pub manifest_path: PathBuf,

    /// TypeScript configuration providing path aliases.
    #[serde(alias = "tsConfigPath", alias = "tsconfig")]
    pub ts_config_path: PathBuf,
}

impl Default for TangleConfig {
    fn default() -> Self {
        Self {
            entrypoint: None,
            circular_max_depth: None,
            dependency_tracking: DependencyTracking::default(),
            file_extensions: DEFAULT_FILE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            include_base_dir: false,
            incremental: false,
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            ts_config_path: PathBuf::from(DEFAULT_TS_CONFIG_PATH),
        }
    }
}

/// Switches controlling which dependency kinds are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyTracking {
    /// Record npm packages in `thirdPartyDependencies`.
    #[serde(alias = "thirdParty")]
    pub third_party: bool,

    /// Record platform modules in `builtinDependencies`.
    pub builtin: bool,

    /// Follow `import type` / `export type` declarations.
    #[serde(alias = "typeOnly")]
    pub type_only: bool,
}

impl Default for DependencyTracking {
    fn default() -> Self {
        Self {
            third_party: false,
            builtin: false,
            type_only: true,
        }
    }
}

impl TangleConfig {
    /// Create a configuration that starts from `entrypoint`.
    pub fn with_entrypoint(entrypoint: impl Into<PathBuf>) -> Self {
        Self {
            entrypoint: Some(entrypoint.into()),
            ..Self::default()
        }
    }

    /// Create from a `serde_json::Value`, e.g. the `tangle` field of a manifest.
    ///
    /// # Example
    ///
    /// ```
    /// use tangle_config::TangleConfig;
    /// use serde_json::json;
    ///
    /// let config = TangleConfig::from_value(json!({
    ///     "entrypoint": "src/index.ts",
    ///     "dependencyTracking": { "thirdParty": true }
    /// }))
    /// .unwrap();
    ///
    /// assert!(config.dependency_tracking.third_party);
    /// assert!(config.dependency_tracking.type_only);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Canonical JSON form, used for fingerprinting.
    pub fn to_canonical_json(&self) -> ConfigResult<String> {
        serde_json::to_string(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Whether `extension` (with or without its leading dot) is followed.
    pub fn supports_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.file_extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.') == extension)
    }
}

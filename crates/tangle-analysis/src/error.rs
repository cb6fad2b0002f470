//! Errors surfaced by the analysis.
//!
//! Only a missing entrypoint aborts graph construction. Everything that goes
//! wrong per file or per specifier is logged and absorbed by the traversal.

use std::path::PathBuf;

use tangle_config::ConfigError;
use thiserror::Error;

use crate::runtime::RuntimeError;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The configured entrypoint does not resolve to a file.
    #[error("entrypoint not found: {0}")]
    EntrypointNotFound(PathBuf),

    /// The unused-dependency query could not locate the manifest.
    #[error("manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("invalid manifest {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

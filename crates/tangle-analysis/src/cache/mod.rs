//! Incremental analysis cache.
//!
//! Results of a run are persisted per file, keyed by node id and guarded by a
//! content hash. The next run re-walks only files whose content changed; the
//! rest get their specifiers restored from the cache.
//!
//! # Invalidation
//!
//! - **File level**: the stored BLAKE3 content hash differs from the current one
//! - **Run level**: the configuration fingerprint differs, which drops every entry
//!
//! # Failure policy
//!
//! Cache problems never fail an analysis. A missing, corrupt or stale cache
//! file behaves as an empty cache, and a failed write is logged.
//!
//! # File format
//!
//! ```text
//! <cwd>/.tangle/cache.json
//! { "configurationHash": "<fingerprint>", "sourceFiles": { "<id>": { "hash": "...", "value": <Node> } } }
//! ```

pub mod incremental;
mod key;

pub use incremental::{CacheEntry, CacheFile, IncrementalCache};
pub use key::{config_fingerprint, content_hash};

use crate::runtime::RuntimeError;

/// Directory, relative to the working directory, holding the cache file.
pub const CACHE_DIR: &str = ".tangle";

/// Name of the cache file inside [`CACHE_DIR`].
pub const CACHE_FILE: &str = "cache.json";

/// Reasons a cache could not be used. Logged, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to read cache: {0}")]
    Read(#[source] RuntimeError),

    #[error("corrupt cache file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("configuration changed since the cache was written")]
    ConfigurationChanged,

    #[error("failed to fingerprint configuration: {0}")]
    Fingerprint(String),

    #[error("failed to serialize cache: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write cache: {0}")]
    Write(#[source] RuntimeError),
}

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

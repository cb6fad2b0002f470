//! Extension and index-file probing for local specifiers.
//!
//! Candidates are tried in a fixed order and the first existing file wins:
//!
//! ```text
//! 1. <path>               if its extension is supported
//! 2. <path>/index.js
//! 3. <path>.js
//! 4. <path>/index.ts
//! 5. <path> with .ts as extension
//! 6. <path><ext>, <path>/index<ext>   for the remaining configured extensions
//! 7. <path>.js            returned even though nothing exists
//! ```
//!
//! The resolver never fails; the engine drops the edge when the returned
//! path is not a file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::classify::is_supported;
use crate::runtime::Runtime;

/// Default script extension.
pub const SCRIPT_EXTENSION: &str = ".js";

/// Default typed-source extension.
pub const TYPED_EXTENSION: &str = ".ts";

/// Resolve `path` (already joined onto its base directory) to a file.
pub async fn resolve_path(path: &Path, extensions: &[String], runtime: &dyn Runtime) -> PathBuf {
    for candidate in candidates(path, extensions) {
        if runtime.is_file(&candidate).await {
            return candidate;
        }
    }
    append_extension(path, SCRIPT_EXTENSION)
}

/// The probe sequence for `path`, in order. May contain duplicates.
pub fn candidates(path: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(4 + extensions.len() * 2);

    if is_supported(path, extensions) {
        candidates.push(path.to_path_buf());
    }
    candidates.push(index_file(path, SCRIPT_EXTENSION));
    candidates.push(append_extension(path, SCRIPT_EXTENSION));
    candidates.push(index_file(path, TYPED_EXTENSION));
    candidates.push(path.with_extension(TYPED_EXTENSION.trim_start_matches('.')));

    for ext in extensions {
        if ext == SCRIPT_EXTENSION || ext == TYPED_EXTENSION {
            continue;
        }
        candidates.push(append_extension(path, ext));
        candidates.push(index_file(path, ext));
    }

    candidates
}

/// `<path><ext>`, keeping any extension `path` already has (`a.service` → `a.service.js`).
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(ext);
    PathBuf::from(name)
}

fn index_file(dir: &Path, ext: &str) -> PathBuf {
    dir.join(format!("index{ext}"))
}

//! Graph walking: specifier extraction, directory discovery and the
//! depth-first traversal that turns files into a [`ModuleGraph`].
//!
//! [`ModuleGraph`]: tangle_graph::ModuleGraph

pub mod discovery;
pub mod parser;
pub mod traversal;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use discovery::{IGNORED_DIRS, discover_files};
pub use parser::EcmaScriptWalker;
pub use traversal::{Traversal, TraversalOutput};

/// Options handed to a [`ModuleWalker`] for every file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Report `import type` / `export type` declarations too.
    pub track_type_only: bool,
}

/// Errors raised while extracting specifiers from one file.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Extracts the raw module specifiers a file references.
///
/// Implementations return each specifier once, in source order. The engine
/// is agnostic to how the list is produced.
pub trait ModuleWalker: Send + Sync + std::fmt::Debug {
    fn walk(&self, path: &Path, content: &str, options: &WalkOptions) -> Result<Vec<String>, WalkError>;
}

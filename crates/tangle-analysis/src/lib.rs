//! # tangle-analysis
//!
//! Builds the module dependency graph of a JavaScript/TypeScript project.
//!
//! Starting from an entrypoint (or every supported file under a directory),
//! the analysis follows module references transitively, classifies each one
//! as a local file, a builtin module, a third-party package or an asset, and
//! resolves extensionless, directory and path-alias specifiers along the way.
//!
//! ## Pipeline
//!
//! ```text
//! Traversal ──► IncrementalCache ──► ModuleWalker ──► PathAliases
//!     ▲                                                   │
//!     │                                                   ▼
//!     └──── edge + child ◄── resolve_path ◄── DependencyResolver pipeline
//! ```
//!
//! All filesystem access goes through the [`Runtime`](runtime::Runtime)
//! trait. Queries over the finished graph live on [`AnalysisResult`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tangle_analysis::Analyzer;
//! use tangle_analysis::runtime::memory::MemoryRuntime;
//! use tangle_config::TangleConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> tangle_analysis::Result<()> {
//! let runtime = MemoryRuntime::new("/project")
//!     .with_file("a.js", "import './b.js';")
//!     .with_file("b.js", "import './a.js';");
//!
//! let result = Analyzer::new(TangleConfig::with_entrypoint("a.js"))
//!     .runtime(Arc::new(runtime))
//!     .analyze()
//!     .await?;
//!
//! assert_eq!(result.files, vec!["a.js", "b.js"]);
//! assert!(result.has_circular_dependencies());
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and installs no subscriber. Enable the
//! `logging` feature for [`logging::init_logging`].

pub mod analyzer;
pub mod cache;
pub mod classify;
pub mod error;
pub mod manifest;
pub mod paths;
pub mod resolver;
pub mod result;
pub mod runtime;
pub mod walker;

#[cfg(feature = "logging")]
pub mod logging;

pub use analyzer::Analyzer;
pub use error::{AnalyzeError, Result};
pub use manifest::{PackageJson, UnusedDependencyFinder};
pub use resolver::{DependencyResolver, ResolverContext, ResolverOutcome};
pub use result::{AnalysisResult, UnusedDependencies, UnusedDependencyOptions};
pub use walker::{ModuleWalker, WalkError, WalkOptions};

pub use tangle_config::TangleConfig;
pub use tangle_graph::{ModuleGraph, Node, NodeBody};

#[cfg(test)]
mod tests;

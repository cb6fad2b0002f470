//! # tangle-graph
//!
//! Pure data structures for module dependency graphs.
//!
//! This crate holds the graph produced by an analysis run and the queries
//! that run over it once traversal is finished. It performs no I/O: building
//! the graph from source files is the job of `tangle-analysis`.
//!
//! ## Overview
//!
//! - [`ModuleGraph`]: id → [`Node`] in first-discovery order, serialized as a
//!   plain JSON object.
//! - [`Node`]: outgoing edges (`adjacentTo`) plus the builtin and
//!   third-party packages the file references.
//! - Queries: [`leaves`](ModuleGraph::leaves),
//!   [`deep_ancestors`](ModuleGraph::deep_ancestors),
//!   [`find_cycles`](ModuleGraph::find_cycles),
//!   [`unused_third_party_dependencies`].
//!
//! ## Invariants
//!
//! ```text
//! every id in any adjacentTo   ──►  is a key of the graph
//! adjacentTo / *Dependencies   ──►  insertion ordered, no repeats
//! a -> a                       ──►  legal, reported as a cycle of one
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tangle_graph::ModuleGraph;
//!
//! let mut graph = ModuleGraph::new();
//! graph.add_node("index.js");
//! graph.add_edge("index.js", "lib.js");
//! graph.add_edge("lib.js", "index.js");
//! graph.add_third_party_dependency("lib.js", "lodash");
//!
//! assert_eq!(graph.leaves(), Vec::<String>::new());
//! assert_eq!(graph.find_cycles(None), vec![vec!["index.js", "lib.js"]]);
//! assert_eq!(graph.deep_ancestors("lib.js"), vec!["index.js"]);
//!
//! let unused = graph.unused_third_party_dependencies(["lodash", "react"], Vec::new());
//! assert_eq!(unused, vec!["react"]);
//! ```

pub mod cycles;
pub mod graph;
pub mod node;
pub mod queries;
pub mod unused;

pub use graph::ModuleGraph;
pub use node::{Node, NodeBody};
pub use unused::unused_third_party_dependencies;

/// Error types for graph (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node lists an edge to an id that is not in the graph.
    #[error("edge {from} -> {to} points outside the graph")]
    DanglingEdge { from: String, to: String },

    /// A node is stored under a key different from its own id.
    #[error("node '{id}' is stored under key '{key}'")]
    IdMismatch { key: String, id: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;

//! Graph vertices.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One discovered source file.
///
/// The ordered sets keep discovery order and reject duplicates, so an edge or
/// a dependency name is never listed twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Path of the file relative to the run's base directory, `/`-separated.
    pub id: String,
    /// Ids of the files this one references, in discovery order.
    pub adjacent_to: IndexSet<String>,
    pub body: NodeBody,
}

/// Facts recorded about a file while its specifiers are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBody {
    /// File size in bytes as reported by the runtime.
    pub size: u64,
    pub builtin_dependencies: IndexSet<String>,
    pub third_party_dependencies: IndexSet<String>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            adjacent_to: IndexSet::new(),
            body: NodeBody::default(),
        }
    }

    /// A node with no outgoing edges.
    pub fn is_leaf(&self) -> bool {
        self.adjacent_to.is_empty()
    }
}

//! The module graph and its mutations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::{Error, Result};

/// Mapping from node id to [`Node`], in first-discovery order.
///
/// Every id referenced by an edge is also a key: [`ModuleGraph::add_edge`]
/// registers a missing target, and no operation removes nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleGraph {
    nodes: IndexMap<String, Node>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id`, returning `true` when it was not present yet.
    pub fn add_node(&mut self, id: &str) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }
        self.nodes.insert(id.to_string(), Node::new(id));
        true
    }

    /// Add the edge `from -> to`, registering either endpoint if needed.
    ///
    /// Returns `false` when the edge already existed. Self-edges are kept.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        self.add_node(from);
        self.add_node(to);
        self.entry(from).adjacent_to.insert(to.to_string())
    }

    /// Record a platform module used by `id`.
    pub fn add_builtin_dependency(&mut self, id: &str, name: &str) -> bool {
        self.add_node(id);
        self.entry(id)
            .body
            .builtin_dependencies
            .insert(name.to_string())
    }

    /// Record a third-party package used by `id`.
    pub fn add_third_party_dependency(&mut self, id: &str, name: &str) -> bool {
        self.add_node(id);
        self.entry(id)
            .body
            .third_party_dependencies
            .insert(name.to_string())
    }

    pub fn set_size(&mut self, id: &str, size: u64) {
        self.add_node(id);
        self.entry(id).body.size = size;
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in first-discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of `id` in discovery order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Parse a serialized graph, checking that every edge target is a node.
    pub fn from_json(json: &str) -> Result<Self> {
        let graph: Self = serde_json::from_str(json)?;
        graph.check()?;
        Ok(graph)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check(&self) -> Result<()> {
        for (key, node) in &self.nodes {
            if key != &node.id {
                return Err(Error::IdMismatch {
                    key: key.clone(),
                    id: node.id.clone(),
                });
            }
            if let Some(missing) = node.adjacent_to.iter().find(|to| !self.contains(to)) {
                return Err(Error::DanglingEdge {
                    from: key.clone(),
                    to: missing.clone(),
                });
            }
        }
        Ok(())
    }

    // Callers register the node first.
    fn entry(&mut self, id: &str) -> &mut Node {
        self.nodes
            .entry(id.to_string())
            .or_insert_with(|| Node::new(id))
    }
}

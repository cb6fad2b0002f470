//! Read-only reachability queries over a finished graph.

use std::collections::VecDeque;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::ModuleGraph;

impl ModuleGraph {
    /// Ids of nodes without outgoing edges, in graph order.
    pub fn leaves(&self) -> Vec<String> {
        self.nodes()
            .filter(|node| node.is_leaf())
            .map(|node| node.id.clone())
            .collect()
    }

    /// Ids of nodes with an edge to `id`, in graph order.
    pub fn dependents(&self, id: &str) -> Vec<String> {
        self.nodes()
            .filter(|node| node.adjacent_to.contains(id))
            .map(|node| node.id.clone())
            .collect()
    }

    /// Every node with a directed path to `id`, nearest first.
    ///
    /// `id` itself is never part of the answer, even when it sits on a cycle.
    /// Unknown ids have no ancestors.
    pub fn deep_ancestors(&self, id: &str) -> Vec<String> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut reverse: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for node in self.nodes() {
            for target in &node.adjacent_to {
                reverse.entry(target.as_str()).or_default().push(&node.id);
            }
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        seen.insert(id);
        let mut ancestors = Vec::new();
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            let Some(parents) = reverse.get(current) else {
                continue;
            };
            for &parent in parents {
                if seen.insert(parent) {
                    ancestors.push(parent.to_string());
                    queue.push_back(parent);
                }
            }
        }

        ancestors
    }

    /// Third-party package names observed anywhere in the graph, first use first.
    pub fn third_party_dependencies(&self) -> IndexSet<String> {
        self.nodes()
            .flat_map(|node| node.body.third_party_dependencies.iter().cloned())
            .collect()
    }

    /// Builtin module names observed anywhere in the graph, first use first.
    pub fn builtin_dependencies(&self) -> IndexSet<String> {
        self.nodes()
            .flat_map(|node| node.body.builtin_dependencies.iter().cloned())
            .collect()
    }
}

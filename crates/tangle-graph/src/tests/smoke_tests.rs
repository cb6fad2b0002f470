//! Smoke tests for tangle-graph.
//!
//! Fast, deterministic checks of the graph invariants across the public API.
//! Randomized coverage lives in property_tests.rs.

use crate::ModuleGraph;

/// Builds the graph of a small project:
///
/// ```text
/// index.js -> a.js -> b.js -> a.js
///          -> c.js
/// ```
fn project() -> ModuleGraph {
    let mut graph = ModuleGraph::new();
    graph.add_node("index.js");
    graph.add_edge("index.js", "a.js");
    graph.add_edge("index.js", "c.js");
    graph.add_edge("a.js", "b.js");
    graph.add_edge("b.js", "a.js");
    graph.add_builtin_dependency("c.js", "node:path");
    graph.add_third_party_dependency("b.js", "lodash");
    graph
}

#[test]
fn test_every_edge_target_is_a_node() {
    let graph = project();
    for node in graph.nodes() {
        for target in &node.adjacent_to {
            assert!(graph.contains(target), "{} -> {target} dangles", node.id);
        }
    }
}

#[test]
fn test_discovery_order_is_kept() {
    let graph = project();
    assert_eq!(
        graph.ids().collect::<Vec<_>>(),
        vec!["index.js", "a.js", "c.js", "b.js"]
    );
    let index = graph.node("index.js").unwrap();
    assert_eq!(
        index.adjacent_to.iter().collect::<Vec<_>>(),
        vec!["a.js", "c.js"]
    );
}

#[test]
fn test_queries_on_small_project() {
    let graph = project();

    assert_eq!(graph.leaves(), vec!["c.js"]);
    assert_eq!(graph.find_cycles(None), vec![vec!["a.js", "b.js"]]);
    assert_eq!(graph.deep_ancestors("b.js"), vec!["a.js", "index.js"]);
    assert_eq!(
        graph.unused_third_party_dependencies(["express", "lodash"], Vec::new()),
        vec!["express"]
    );
}

#[test]
fn test_serialized_shape() {
    let graph = project();
    let value = serde_json::to_value(&graph).unwrap();

    assert!(value.is_object());
    assert_eq!(value["c.js"]["body"]["builtinDependencies"][0], "node:path");
    assert_eq!(value["b.js"]["adjacentTo"][0], "a.js");
}

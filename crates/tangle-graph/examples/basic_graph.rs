//! Basic graph construction and queries example.
//!
//! This example demonstrates:
//! - Building a ModuleGraph by hand
//! - Recording third-party and builtin dependencies
//! - Querying leaves, dependents and ancestors
//! - Detecting circular dependencies

use tangle_graph::ModuleGraph;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut graph = ModuleGraph::new();

    // index -> api -> utils -> api
    graph.add_node("index.ts");
    graph.add_edge("index.ts", "api.ts");
    graph.add_edge("index.ts", "utils.ts");
    graph.add_edge("api.ts", "utils.ts");
    graph.add_edge("utils.ts", "api.ts");
    graph.add_edge("api.ts", "format.ts");

    graph.add_third_party_dependency("api.ts", "axios");
    graph.add_builtin_dependency("utils.ts", "node:path");
    graph.set_size("index.ts", 120);

    println!("Nodes: {:?}", graph.ids().collect::<Vec<_>>());
    println!("Leaves: {:?}", graph.leaves());
    println!("Direct dependents of utils.ts: {:?}", graph.dependents("utils.ts"));
    println!("Everything that reaches format.ts: {:?}", graph.deep_ancestors("format.ts"));
    println!("Third-party packages: {:?}", graph.third_party_dependencies());

    for cycle in graph.find_cycles(None) {
        println!("Cycle: {}", cycle.join(" -> "));
    }

    println!("\n{}", graph.to_json_pretty()?);

    Ok(())
}

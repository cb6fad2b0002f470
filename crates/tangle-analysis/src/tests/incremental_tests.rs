//! Incremental mode: cache persistence, restoration and invalidation.

use std::path::Path;

use tangle_config::TangleConfig;

use super::test_helpers::*;

fn incremental(entry: &str) -> TangleConfig {
    let mut config = TangleConfig::with_entrypoint(entry);
    config.incremental = true;
    config.dependency_tracking.third_party = true;
    config.dependency_tracking.builtin = true;
    config
}

fn sample() -> Vec<(&'static str, &'static str)> {
    vec![
        ("src/index.ts", "import './a';\nimport 'react';\nimport '../shared/b';"),
        ("src/a.ts", "import 'node:path';\nimport './nested/c';\nimport './index';"),
        ("src/nested/c.ts", "import '../../shared/b';\nimport 'lodash/fp';"),
        ("shared/b.ts", "export const b = 1;"),
    ]
}

#[tokio::test]
async fn test_unchanged_tree_is_restored_without_walking() {
    let runtime = project(&sample());
    let walker = CountingWalker::new();

    let first = analyze_with_walker(&runtime, incremental("src/index.ts"), &walker).await;
    assert_eq!(walker.count(), 4);
    assert!(runtime.get("/project/.tangle/cache.json").is_some());

    walker.reset();
    let second = analyze_with_walker(&runtime, incremental("src/index.ts"), &walker).await;
    assert_eq!(walker.count(), 0);
    assert_eq!(
        first.graph.to_json_pretty().unwrap(),
        second.graph.to_json_pretty().unwrap()
    );
    assert_eq!(first.files, second.files);
}

#[tokio::test]
async fn test_only_changed_files_are_walked_again() {
    let runtime = project(&sample());
    let walker = CountingWalker::new();
    analyze_with_walker(&runtime, incremental("src/index.ts"), &walker).await;

    runtime.insert("shared/b.ts", "import '../src/nested/c';");
    walker.reset();
    let result = analyze_with_walker(&runtime, incremental("src/index.ts"), &walker).await;

    assert_eq!(walker.calls(), vec![Path::new("/project/shared/b.ts").to_path_buf()]);
    assert_eq!(edges(&result, "../shared/b.ts"), vec!["nested/c.ts"]);
    assert!(result.has_circular_dependencies());
}

#[tokio::test]
async fn test_configuration_change_invalidates_every_entry() {
    let runtime = project(&sample());
    let walker = CountingWalker::new();
    analyze_with_walker(&runtime, incremental("src/index.ts"), &walker).await;

    let mut changed = incremental("src/index.ts");
    changed.dependency_tracking.builtin = false;
    walker.reset();
    let result = analyze_with_walker(&runtime, changed, &walker).await;

    assert_eq!(walker.count(), result.files.len());
    assert!(result.graph.builtin_dependencies().is_empty());
}

#[tokio::test]
async fn test_corrupt_cache_falls_back_to_full_walk() {
    let runtime = project(&sample());
    runtime.insert(".tangle/cache.json", "{\"configurationHash\": 42");
    let walker = CountingWalker::new();

    let result = analyze_with_walker(&runtime, incremental("src/index.ts"), &walker).await;
    assert_eq!(walker.count(), 4);
    assert_eq!(result.files.len(), 4);

    // The unusable file is replaced by a valid cache.
    walker.reset();
    analyze_with_walker(&runtime, incremental("src/index.ts"), &walker).await;
    assert_eq!(walker.count(), 0);
}

#[tokio::test]
async fn test_non_incremental_runs_leave_no_cache() {
    let runtime = project(&sample());
    analyze(&runtime, TangleConfig::with_entrypoint("src/index.ts")).await;
    assert!(runtime.get("/project/.tangle/cache.json").is_none());
}

#[tokio::test]
async fn test_restored_edges_to_dotted_file_names() {
    let runtime = project(&[
        ("index.js", "import './..config.js';\nimport 'react';"),
        ("..config.js", "export default {};"),
    ]);
    let walker = CountingWalker::new();
    let first = analyze_with_walker(&runtime, incremental("index.js"), &walker).await;
    assert_eq!(edges(&first, "index.js"), vec!["..config.js"]);

    walker.reset();
    let second = analyze_with_walker(&runtime, incremental("index.js"), &walker).await;
    assert_eq!(walker.count(), 0);
    assert_eq!(edges(&second, "index.js"), vec!["..config.js"]);
    let third_party = &second.graph.node("index.js").unwrap().body.third_party_dependencies;
    assert_eq!(third_party.iter().collect::<Vec<_>>(), vec!["react"]);
}

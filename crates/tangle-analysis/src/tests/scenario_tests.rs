//! End-to-end scenarios on small in-memory projects.

use serde_json::json;
use tangle_config::TangleConfig;

use super::test_helpers::*;
use crate::{AnalyzeError, UnusedDependencyOptions};

#[tokio::test]
async fn test_single_file_project() {
    let runtime = project(&[("index.js", "console.log('hi')")]);
    let result = analyze(&runtime, TangleConfig::with_entrypoint("index.js")).await;

    assert_eq!(
        serde_json::to_value(&result.graph).unwrap(),
        json!({
            "index.js": {
                "id": "index.js",
                "adjacentTo": [],
                "body": { "size": 0, "builtinDependencies": [], "thirdPartyDependencies": [] }
            }
        })
    );
    assert_eq!(result.files, vec!["index.js"]);
    assert_eq!(result.find_leaves(), vec!["index.js"]);
    assert!(!result.has_circular_dependencies());
}

#[tokio::test]
async fn test_two_file_cycle() {
    let runtime = project(&[
        ("a.js", "import './b.js';"),
        ("b.js", "import './a.js';\nimport './c.js';"),
        ("c.js", ""),
    ]);
    let result = analyze(&runtime, TangleConfig::with_entrypoint("a.js")).await;

    assert_eq!(edges(&result, "a.js"), vec!["b.js"]);
    assert_eq!(edges(&result, "b.js"), vec!["a.js", "c.js"]);
    assert!(edges(&result, "c.js").is_empty());

    assert!(result.has_circular_dependencies());
    let cycles = result.find_circular_dependencies();
    assert_eq!(cycles.len(), 1);
    let mut members = cycles[0].clone();
    members.sort();
    assert_eq!(members, vec!["a.js", "b.js"]);
}

#[tokio::test]
async fn test_assets_never_become_nodes() {
    let runtime = project(&[
        (
            "index.js",
            "require('./mod.js');\nrequire('./data.json');\nrequire('./native.node');",
        ),
        ("mod.js", ""),
        ("data.json", "{}"),
        ("native.node", ""),
    ]);
    let result = analyze(&runtime, TangleConfig::with_entrypoint("index.js")).await;

    assert_eq!(result.files, vec!["index.js", "mod.js"]);
    assert_eq!(result.graph.len(), 2);
    assert_eq!(edges(&result, "index.js"), vec!["mod.js"]);
}

#[tokio::test]
async fn test_exact_path_alias() {
    let runtime = project(&[
        (
            "tsconfig.json",
            r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@lib": ["lib/index.ts"] } } }"#,
        ),
        ("index.ts", "import { lib } from '@lib';"),
        ("lib/index.ts", "export const lib = 1;"),
    ]);
    let result = analyze(&runtime, TangleConfig::with_entrypoint("index.ts")).await;

    assert_eq!(edges(&result, "index.ts"), vec!["lib/index.ts"]);
    assert!(result.graph.node("index.ts").unwrap().body.third_party_dependencies.is_empty());
}

#[tokio::test]
async fn test_unused_dependencies_follow_manifest_order() {
    let runtime = project(&[
        (
            "package.json",
            r#"{ "dependencies": { "a": "1.0.0", "b": "1.0.0", "c": "1.0.0" } }"#,
        ),
        ("index.js", "import a from 'a';"),
    ]);
    let mut config = TangleConfig::with_entrypoint("index.js");
    config.dependency_tracking.third_party = true;

    let result = analyze(&runtime, config).await;
    let unused = result
        .find_unused_dependencies(UnusedDependencyOptions::default())
        .await
        .unwrap();
    assert_eq!(unused.third_party, vec!["b", "c"]);
}

#[tokio::test]
async fn test_unused_dependencies_without_tracking_reports_everything() {
    let runtime = project(&[
        ("package.json", r#"{ "dependencies": { "a": "1" }, "devDependencies": { "d": "1" } }"#),
        ("index.js", "import a from 'a';"),
    ]);
    let result = analyze(&runtime, TangleConfig::with_entrypoint("index.js")).await;

    let unused = result
        .find_unused_dependencies(UnusedDependencyOptions::default())
        .await
        .unwrap();
    assert_eq!(unused.third_party, vec!["a", "d"]);
}

#[tokio::test]
async fn test_unused_dependencies_merge_external_finder() {
    use crate::{PackageJson, UnusedDependencyFinder};
    use async_trait::async_trait;

    struct DevTools;

    #[async_trait]
    impl UnusedDependencyFinder for DevTools {
        async fn find_unused(&self, manifest: &PackageJson) -> Vec<String> {
            manifest.dev_dependencies.keys().cloned().collect()
        }
    }

    let runtime = project(&[
        (
            "package.json",
            r#"{ "dependencies": { "a": "1", "b": "1" }, "devDependencies": { "eslint": "9" } }"#,
        ),
        ("index.js", "import a from 'a';\nimport b from 'b';"),
    ]);
    let mut config = TangleConfig::with_entrypoint("index.js");
    config.dependency_tracking.third_party = true;
    let result = analyze(&runtime, config).await;

    let unused = result
        .find_unused_dependencies(UnusedDependencyOptions {
            finder: Some(&DevTools),
        })
        .await
        .unwrap();
    assert_eq!(unused.third_party, vec!["eslint"]);
}

#[tokio::test]
async fn test_missing_manifest_fails_only_the_query() {
    let runtime = project(&[("index.js", "")]);
    let result = analyze(&runtime, TangleConfig::with_entrypoint("index.js")).await;

    let err = result
        .find_unused_dependencies(UnusedDependencyOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::ManifestNotFound(_)));
    assert_eq!(result.files, vec!["index.js"]);
}

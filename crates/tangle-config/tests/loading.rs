//! Tests for layered configuration loading.

#![allow(clippy::disallowed_methods)]

use std::fs;
use std::path::PathBuf;

use tangle_config::{ConfigError, TangleConfig};
use tempfile::TempDir;

#[test]
fn load_without_files_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = TangleConfig::load(dir.path()).unwrap();
    assert_eq!(config, TangleConfig::default());
}

#[test]
fn load_reads_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tangle.toml"),
        r#"
entrypoint = "src/main.ts"
circular_max_depth = 8
file_extensions = [".ts", ".tsx"]

[dependency_tracking]
third_party = true
"#,
    )
    .unwrap();

    let config = TangleConfig::load(dir.path()).unwrap();
    assert_eq!(config.entrypoint, Some(PathBuf::from("src/main.ts")));
    assert_eq!(config.circular_max_depth, Some(8));
    assert_eq!(config.file_extensions, vec![".ts", ".tsx"]);
    assert!(config.dependency_tracking.third_party);
    // Untouched nested keys keep their defaults.
    assert!(!config.dependency_tracking.builtin);
    assert!(config.dependency_tracking.type_only);
}

#[test]
fn load_reads_camel_case_package_json_field() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "name": "app",
            "dependencies": { "react": "^18.0.0" },
            "tangle": {
                "includeBaseDir": true,
                "dependencyTracking": { "builtin": true, "typeOnly": false }
            }
        }"#,
    )
    .unwrap();

    let config = TangleConfig::load(dir.path()).unwrap();
    assert!(config.include_base_dir);
    assert!(config.dependency_tracking.builtin);
    assert!(!config.dependency_tracking.type_only);
    assert_eq!(config.manifest_path, PathBuf::from("package.json"));
}

#[test]
fn load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tangle.json"), r#"{ "fileExtensions": ["ts"] }"#).unwrap();

    let err = TangleConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaValidation { .. }));
}

#[test]
fn load_file_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = TangleConfig::load_file(dir.path().join("tangle.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn load_file_accepts_explicit_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tangle.ci.json");
    fs::write(&path, r#"{ "incremental": true, "circularMaxDepth": 3 }"#).unwrap();

    let config = TangleConfig::load_file(&path).unwrap();
    assert!(config.incremental);
    assert_eq!(config.circular_max_depth, Some(3));
}

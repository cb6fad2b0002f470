//! File-based config discovery.
//!
//! Finds tangle configuration in conventional locations of a project root.

// Config discovery runs before any runtime exists, so it reads the disk directly.
#![allow(clippy::disallowed_methods)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Field of `package.json` holding tangle options.
pub const PACKAGE_JSON_FIELD: &str = "tangle";

/// A configuration file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `tangle.toml`
    Toml(PathBuf),
    /// `tangle.json`
    Json(PathBuf),
    /// The `tangle` field of `package.json`
    PackageJson(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Toml(path) | Self::Json(path) | Self::PackageJson(path) => path,
        }
    }

    /// Classify an explicitly given file by its name and extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.file_name().and_then(|n| n.to_str()) == Some("package.json") {
            return Ok(Self::PackageJson(path));
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml(path)),
            Some("json") => Ok(Self::Json(path)),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Searches a project root for tangle configuration.
///
/// # Example
///
/// ```no_run
/// use tangle_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// if let Some(source) = discovery.find() {
///     println!("using {}", source.path().display());
/// }
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config source in the root directory.
    ///
    /// Searches in this order:
    /// 1. `tangle.toml`
    /// 2. `tangle.json`
    /// 3. `package.json` with a non-null `tangle` field
    pub fn find(&self) -> Option<ConfigSource> {
        let toml_path = self.root.join("tangle.toml");
        if toml_path.is_file() {
            return Some(ConfigSource::Toml(toml_path));
        }

        let json_path = self.root.join("tangle.json");
        if json_path.is_file() {
            return Some(ConfigSource::Json(json_path));
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed = serde_json::from_str::<Value>(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(value) if !value.is_null() => Some(ConfigSource::PackageJson(pkg_path)),
            _ => None,
        }
    }

    /// Read a JSON source into a value with snake_case keys.
    ///
    /// TOML sources are handed to figment directly and never pass through here.
    pub(crate) fn read_json(source: &ConfigSource) -> Result<Value> {
        let path = source.path();
        let content = fs::read_to_string(path)?;
        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: path.display().to_string(),
                hint: Some(format!("Invalid JSON: {e}")),
            })?;

        let value = match source {
            ConfigSource::PackageJson(_) => parsed
                .get(PACKAGE_JSON_FIELD)
                .cloned()
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: PACKAGE_JSON_FIELD.to_string(),
                    hint: Some("Add a 'tangle' field to your package.json".to_string()),
                })?,
            _ => parsed,
        };

        if !value.is_object() {
            return Err(ConfigError::InvalidValue {
                field: path.display().to_string(),
                hint: Some("configuration must be an object".to_string()),
            });
        }

        Ok(snake_case_keys(value))
    }
}

/// Rewrite object keys from camelCase to snake_case, recursively.
///
/// Layered sources are merged as dictionaries, so `includeBaseDir` in one
/// layer must land on the same key as `include_base_dir` in another.
pub(crate) fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (to_snake_case(&key), snake_case_keys(value)))
                .collect::<Map<_, _>>(),
        ),
        other => other,
    }
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

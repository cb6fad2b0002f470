//! Reading `tsconfig.json` files.
//!
//! TypeScript configurations are JSONC: comments and trailing commas are
//! allowed. They are stripped before handing the text to `serde_json`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;
use serde::Deserialize;

use crate::runtime::{Runtime, RuntimeError};

/// Errors reading a single configuration file of an `extends` chain.
#[derive(Debug, thiserror::Error)]
pub enum TsConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TsConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Read {
                source: RuntimeError::FileNotFound(_),
                ..
            }
        )
    }
}

/// The parts of a TypeScript configuration that affect module resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub extends: Option<Extends>,
    #[serde(default)]
    pub compiler_options: CompilerOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub base_url: Option<String>,
    #[serde(default)]
    pub paths: IndexMap<String, Vec<String>>,
}

/// `extends` accepts one configuration or, since TypeScript 5.0, several.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    pub fn specifiers(&self) -> Vec<&str> {
        match self {
            Self::One(spec) => vec![spec.as_str()],
            Self::Many(specs) => specs.iter().map(String::as_str).collect(),
        }
    }
}

impl TsConfig {
    pub fn parse(path: &Path, text: &str) -> Result<Self, TsConfigError> {
        serde_json::from_str(&strip_jsonc(text)).map_err(|source| TsConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub async fn read(runtime: &dyn Runtime, path: &Path) -> Result<Self, TsConfigError> {
        let text = runtime
            .read_to_string(path)
            .await
            .map_err(|source| TsConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(path, &text)
    }
}

/// Locate the file an `extends` entry of the configuration in `config_dir`
/// points at.
///
/// Relative and absolute entries are joined onto `config_dir`; anything else
/// is looked up in `node_modules` directories from `config_dir` upwards. A
/// missing `.json` suffix is appended, and a package directory resolves to
/// its `tsconfig.json`.
pub async fn locate_extends(runtime: &dyn Runtime, config_dir: &Path, spec: &str) -> PathBuf {
    if spec.starts_with('.') || Path::new(spec).is_absolute() {
        return with_json_suffix(config_dir.join(spec).clean());
    }

    for dir in config_dir.ancestors() {
        let package = dir.join("node_modules").join(spec);
        let file = with_json_suffix(package.clone());
        if runtime.is_file(&file).await {
            return file;
        }
        let nested = package.join("tsconfig.json");
        if runtime.is_file(&nested).await {
            return nested;
        }
    }

    with_json_suffix(config_dir.join("node_modules").join(spec))
}

fn with_json_suffix(path: PathBuf) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "json") {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".json");
        PathBuf::from(name)
    }
}

/// Remove `//` and `/* */` comments and trailing commas, leaving string
/// literals untouched.
pub fn strip_jsonc(input: &str) -> String {
    let without_comments = strip_comments(input);
    strip_trailing_commas(&without_comments)
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for skipped in chars.by_ref() {
                    if previous == '*' && skipped == '/' {
                        break;
                    }
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    previous = skipped;
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            out.push(ch);
            if ch == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
            out.push(ch);
        } else if ch == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                out.push(ch);
            }
        } else {
            out.push(ch);
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::memory::MemoryRuntime;

    #[test]
    fn strips_comments_and_trailing_commas() {
        let text = r#"{
            // line comment
            "compilerOptions": {
                /* block
                   comment */
                "baseUrl": "./src", // trailing
                "paths": { "@/*": ["./*",], },
            },
        }"#;
        let config = TsConfig::parse(Path::new("tsconfig.json"), text).unwrap();
        assert_eq!(config.compiler_options.base_url.as_deref(), Some("./src"));
        assert_eq!(config.compiler_options.paths["@/*"], vec!["./*"]);
    }

    #[test]
    fn comment_markers_inside_strings_survive() {
        let text = r#"{ "extends": "./base//x.json", "compilerOptions": { "paths": { "a/*,": ["b/*"] } } }"#;
        let config = TsConfig::parse(Path::new("tsconfig.json"), text).unwrap();
        assert_eq!(config.extends.unwrap().specifiers(), vec!["./base//x.json"]);
        assert!(config.compiler_options.paths.contains_key("a/*,"));
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        let stripped = strip_jsonc(r#"{ "a": "say \"hi\" // not a comment", }"#);
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["a"], "say \"hi\" // not a comment");
    }

    #[test]
    fn extends_accepts_array() {
        let config = TsConfig::parse(
            Path::new("tsconfig.json"),
            r#"{ "extends": ["./a.json", "@tsconfig/node20"] }"#,
        )
        .unwrap();
        assert_eq!(
            config.extends.unwrap().specifiers(),
            vec!["./a.json", "@tsconfig/node20"]
        );
    }

    #[tokio::test]
    async fn locate_relative_and_package_extends() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("node_modules/@tsconfig/node20/tsconfig.json", "{}")
            .with_file("node_modules/shared-config/base.json", "{}");
        let dir = Path::new("/p/app");

        assert_eq!(
            locate_extends(&runtime, dir, "../tsconfig.base").await,
            PathBuf::from("/p/tsconfig.base.json")
        );
        assert_eq!(
            locate_extends(&runtime, dir, "@tsconfig/node20").await,
            PathBuf::from("/p/node_modules/@tsconfig/node20/tsconfig.json")
        );
        assert_eq!(
            locate_extends(&runtime, dir, "shared-config/base").await,
            PathBuf::from("/p/node_modules/shared-config/base.json")
        );
    }
}

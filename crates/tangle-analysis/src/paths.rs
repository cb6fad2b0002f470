//! Node identity: mapping between absolute paths and graph ids.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Path of `target` relative to directory `base`, using `..` when `target`
/// lives outside `base`. Both paths are expected to be absolute and clean.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

/// Render a path with `/` separators whatever the platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Render `target` as a `./` or `../` specifier relative to directory `from`.
pub fn to_relative_specifier(from: &Path, target: &Path) -> String {
    let relative = relative_path(from, target);
    let rendered = to_slash(&relative);
    match relative.components().next() {
        Some(Component::ParentDir) => rendered,
        _ => format!("./{rendered}"),
    }
}

/// Converts between absolute file paths and node ids for one run.
#[derive(Debug, Clone)]
pub struct NodeIds {
    origin: PathBuf,
}

impl NodeIds {
    /// Ids are relative to `cwd` when `include_base_dir` is set, otherwise to
    /// `base_dir`.
    pub fn new(cwd: &Path, base_dir: &Path, include_base_dir: bool) -> Self {
        let origin = if include_base_dir { cwd } else { base_dir };
        Self {
            origin: origin.to_path_buf(),
        }
    }

    pub fn to_id(&self, path: &Path) -> String {
        to_slash(&relative_path(&self.origin, path))
    }

    pub fn to_path(&self, id: &str) -> PathBuf {
        self.origin.join(id).clean()
    }
}

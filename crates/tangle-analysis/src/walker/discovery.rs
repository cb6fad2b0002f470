//! Directory-mode root discovery.

use std::path::{Path, PathBuf};

use crate::cache::CACHE_DIR;
use crate::classify::is_supported;
use crate::runtime::{Runtime, RuntimeResult};

/// Directory names never descended into.
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git", "dist", "coverage", CACHE_DIR];

/// Every file under `root` with one of `extensions`, in sorted pre-order.
///
/// Entries of each directory are visited by name, and a subdirectory's files
/// come where the subdirectory sorts. Only a failure to list `root` itself is
/// an error; unreadable subdirectories are skipped with a warning.
pub async fn discover_files(
    runtime: &dyn Runtime,
    root: &Path,
    extensions: &[String],
) -> RuntimeResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = sorted_entries(runtime, root).await?;
    stack.reverse();

    while let Some(path) = stack.pop() {
        let metadata = match runtime.metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if metadata.is_dir {
            let ignored = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| IGNORED_DIRS.contains(&name));
            if ignored {
                continue;
            }
            match sorted_entries(runtime, &path).await {
                Ok(children) => stack.extend(children.into_iter().rev()),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable directory")
                }
            }
        } else if metadata.is_file && is_supported(&path, extensions) {
            files.push(path);
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "directory scan complete");
    Ok(files)
}

async fn sorted_entries(runtime: &dyn Runtime, dir: &Path) -> RuntimeResult<Vec<PathBuf>> {
    let mut names = runtime.read_dir(dir).await?;
    names.sort();
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::memory::MemoryRuntime;
    use tangle_config::DEFAULT_FILE_EXTENSIONS;

    fn extensions() -> Vec<String> {
        DEFAULT_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[tokio::test]
    async fn sorted_pre_order_with_ignored_dirs() {
        let runtime = MemoryRuntime::new("/p").with_files([
            ("src/b.ts", ""),
            ("src/a/index.ts", ""),
            ("main.js", ""),
            ("README.md", ""),
            ("node_modules/react/index.js", ""),
            ("dist/bundle.js", ""),
            (".tangle/cache.json", "{}"),
        ]);

        let files = discover_files(&runtime, Path::new("/p"), &extensions())
            .await
            .unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("/p/main.js"),
                PathBuf::from("/p/src/a/index.ts"),
                PathBuf::from("/p/src/b.ts"),
            ]
        );
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let runtime = MemoryRuntime::new("/p");
        assert!(
            discover_files(&runtime, Path::new("/nowhere"), &extensions())
                .await
                .is_err()
        );
    }
}

//! In-memory runtime, used by tests and by embedders that analyze
//! generated sources.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use path_clean::PathClean;

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// A [`Runtime`] over an in-memory file tree.
///
/// Relative paths given to the builder methods are placed under the virtual
/// working directory. Directories exist implicitly as ancestors of files.
/// File sizes are not modelled: `metadata` reports `size: 0` for every file.
///
/// ```rust
/// use tangle_analysis::runtime::memory::MemoryRuntime;
///
/// let runtime = MemoryRuntime::new("/project")
///     .with_file("src/index.ts", "import './lib';")
///     .with_file("src/lib.ts", "");
/// ```
#[derive(Debug, Default)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryRuntime {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    pub fn with_file(self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn with_files<P, C>(self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: AsRef<[u8]>,
    {
        for (path, content) in files {
            self.insert(path, content);
        }
        self
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = self.absolute(path.as_ref());
        self.files.write().insert(path, content.as_ref().to_vec());
    }

    /// Content of a file, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().get(&self.absolute(path.as_ref())).cloned()
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        self.cwd.join(path).clean()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().contains(path)
            || self
                .files
                .read()
                .keys()
                .any(|file| file.starts_with(path) && file != path)
    }
}

#[async_trait]
impl Runtime for MemoryRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = self.absolute(path);
        self.files
            .read()
            .get(&path)
            .cloned()
            .ok_or(RuntimeError::FileNotFound(path))
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        let path = self.absolute(path);
        if let Some(parent) = path.parent() {
            if !self.is_dir(parent) {
                return Err(RuntimeError::FileNotFound(parent.to_path_buf()));
            }
        }
        self.files.write().insert(path, content.to_vec());
        Ok(())
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let path = self.absolute(path);
        if self.files.read().contains_key(&path) {
            Ok(FileMetadata {
                size: 0,
                is_dir: false,
                is_file: true,
            })
        } else if self.is_dir(&path) {
            Ok(FileMetadata {
                size: 0,
                is_dir: true,
                is_file: false,
            })
        } else {
            Err(RuntimeError::FileNotFound(path))
        }
    }

    fn exists(&self, path: &Path) -> bool {
        let path = self.absolute(path);
        self.files.read().contains_key(&path) || self.is_dir(&path)
    }

    async fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        let path = self.absolute(path);
        let mut dirs = self.dirs.write();
        if recursive {
            for ancestor in path.ancestors() {
                dirs.insert(ancestor.to_path_buf());
            }
        } else {
            dirs.insert(path);
        }
        Ok(())
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let path = self.absolute(path);
        if !self.is_dir(&path) {
            return Err(RuntimeError::FileNotFound(path));
        }

        let mut names = BTreeSet::new();
        let files = self.files.read();
        let dirs = self.dirs.read();
        for entry in files.keys().chain(dirs.iter()) {
            if let Ok(rest) = entry.strip_prefix(&path) {
                if let Some(first) = rest.components().next() {
                    names.insert(first.as_os_str().to_string_lossy().into_owned());
                }
            }
        }
        Ok(names.into_iter().collect())
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_relative_paths_land_under_cwd() {
        let runtime = MemoryRuntime::new("/project").with_file("src/a.js", "a");

        assert!(runtime.exists(Path::new("/project/src/a.js")));
        assert!(runtime.exists(Path::new("/project/src")));
        assert_eq!(
            runtime.read_file(Path::new("/project/src/a.js")).await.unwrap(),
            b"a"
        );
    }

    #[tokio::test]
    async fn test_metadata_does_not_model_size() {
        let runtime = MemoryRuntime::new("/p").with_file("index.js", "console.log('hi')");
        let metadata = runtime.metadata(Path::new("/p/index.js")).await.unwrap();
        assert!(metadata.is_file);
        assert_eq!(metadata.size, 0);

        let dir = runtime.metadata(Path::new("/p")).await.unwrap();
        assert!(dir.is_dir);
    }

    #[tokio::test]
    async fn test_read_dir_lists_direct_children() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("b.js", "")
            .with_file("lib/a.js", "")
            .with_file("lib/deep/c.js", "");

        assert_eq!(
            runtime.read_dir(Path::new("/p")).await.unwrap(),
            vec!["b.js", "lib"]
        );
        assert_eq!(
            runtime.read_dir(Path::new("/p/lib")).await.unwrap(),
            vec!["a.js", "deep"]
        );
    }

    #[tokio::test]
    async fn test_write_requires_parent() {
        let runtime = MemoryRuntime::new("/p");
        let target = Path::new("/p/.tangle/cache.json");
        assert!(runtime.write_file(target, b"{}").await.is_err());

        runtime
            .create_dir(Path::new("/p/.tangle"), true)
            .await
            .unwrap();
        runtime.write_file(target, b"{}").await.unwrap();
        assert_eq!(runtime.get(target).unwrap(), b"{}");
    }
}

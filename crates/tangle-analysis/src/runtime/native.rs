//! Native filesystem runtime.
//!
//! ```text
//! ┌─────────────────┐
//! │ NativeRuntime   │
//! │  .read_file()   │────▶ std::fs::read()        (spawn_blocking)
//! │  .write_file()  │────▶ std::fs::write()       (spawn_blocking)
//! │  .metadata()    │────▶ std::fs::metadata()    (spawn_blocking)
//! │  .exists()      │────▶ Path::exists()
//! └─────────────────┘
//! ```

// NativeRuntime is the one place that wraps std::fs
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::task;

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// [`Runtime`] over the real filesystem.
///
/// Blocking `std::fs` calls run on tokio's blocking pool, so the traversal
/// must be driven from inside a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct NativeRuntime {
    cwd: Option<PathBuf>,
}

impl NativeRuntime {
    /// Runtime rooted at the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runtime that reports `cwd` as its working directory.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }
}

fn io_error(action: &str, path: &Path, e: io::Error) -> RuntimeError {
    if e.kind() == io::ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(format!("Failed to {action} {}: {e}", path.display()))
    }
}

async fn blocking<T, F>(f: F) -> RuntimeResult<T>
where
    F: FnOnce() -> RuntimeResult<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| RuntimeError::Other(format!("Task join error: {e}")))?
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = path.to_path_buf();
        blocking(move || std::fs::read(&path).map_err(|e| io_error("read", &path, e))).await
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        let path = path.to_path_buf();
        let content = content.to_vec();
        blocking(move || std::fs::write(&path, content).map_err(|e| io_error("write", &path, e)))
            .await
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let path = path.to_path_buf();
        blocking(move || {
            let metadata =
                std::fs::metadata(&path).map_err(|e| io_error("get metadata for", &path, e))?;
            Ok(FileMetadata {
                size: metadata.len(),
                is_dir: metadata.is_dir(),
                is_file: metadata.is_file(),
            })
        })
        .await
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        let path = path.to_path_buf();
        blocking(move || {
            let result = if recursive {
                std::fs::create_dir_all(&path)
            } else {
                std::fs::create_dir(&path)
            };
            result.map_err(|e| io_error("create directory", &path, e))
        })
        .await
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let path = path.to_path_buf();
        blocking(move || {
            let entries =
                std::fs::read_dir(&path).map_err(|e| io_error("read directory", &path, e))?;

            let mut names = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| io_error("read entry of", &path, e))?;
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
            Ok(names)
        })
        .await
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        if let Some(cwd) = &self.cwd {
            return Ok(cwd.clone());
        }
        std::env::current_dir()
            .map_err(|e| RuntimeError::Io(format!("Failed to get current working directory: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_write_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("index.js");

        let runtime = NativeRuntime::new();
        runtime
            .write_file(&file_path, b"export {}")
            .await
            .unwrap();

        assert_eq!(runtime.read_to_string(&file_path).await.unwrap(), "export {}");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = NativeRuntime::new()
            .read_file(&temp_dir.path().join("missing.js"))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_metadata_reports_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a.ts");
        fs::write(&file_path, b"test content").unwrap();

        let metadata = NativeRuntime::new().metadata(&file_path).await.unwrap();
        assert!(metadata.is_file);
        assert!(!metadata.is_dir);
        assert_eq!(metadata.size, 12);
        assert!(NativeRuntime::new().is_file(&file_path).await);
        assert!(!NativeRuntime::new().is_file(temp_dir.path()).await);
    }

    #[tokio::test]
    async fn test_read_dir_and_create_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        NativeRuntime::new().create_dir(&nested, true).await.unwrap();
        fs::write(temp_dir.path().join("x.js"), b"").unwrap();

        let mut entries = NativeRuntime::new().read_dir(temp_dir.path()).await.unwrap();
        entries.sort();
        assert_eq!(entries, vec!["a", "x.js"]);
        assert!(nested.is_dir());
    }

    #[test]
    fn test_cwd_override() {
        let runtime = NativeRuntime::with_cwd("/srv/app");
        assert_eq!(runtime.get_cwd().unwrap(), PathBuf::from("/srv/app"));
    }
}

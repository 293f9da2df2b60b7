//! Local filesystem storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::storage::AudioStore;

/// Local filesystem storage backend.
///
/// The root directory is prepared by the caller; the store only writes files
/// into it.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AudioStore for LocalStore {
    /// Write bytes atomically (write to temp, then rename).
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(file_name);
        let tmp = path.with_extension("tmp");

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_writes_full_bytes() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let path = store.save("hello.mp3", b"audio-bytes").await.unwrap();

        assert_eq!(path, tmp.path().join("hello.mp3"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"audio-bytes");
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        store.save("hello_us.ogg", b"ogg").await.unwrap();

        assert!(!tmp.path().join("hello_us.tmp").exists());
        assert!(tmp.path().join("hello_us.ogg").exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_artifact() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        store.save("hello.mp3", b"old").await.unwrap();
        store.save("hello.mp3", b"new").await.unwrap();

        let path = tmp.path().join("hello.mp3");
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_save_into_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("absent"));

        assert!(store.save("hello.mp3", b"audio").await.is_err());
    }
}

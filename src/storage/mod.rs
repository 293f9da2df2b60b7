//! Storage abstractions for downloaded audio artifacts.

pub mod local;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

pub use local::LocalStore;

/// Trait for audio artifact storage backends.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Persist one artifact under the given file name, returning its final
    /// path.
    ///
    /// The artifact must never be observable in a partially written state at
    /// the final path.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;

    /// Root directory artifacts are written to.
    fn root(&self) -> &Path;
}

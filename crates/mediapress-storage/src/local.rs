use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::paths::AssetPaths;
use crate::traits::{AssetStore, StorageError, StorageResult};

/// Local filesystem asset store.
#[derive(Clone)]
pub struct LocalAssetStore {
    paths: AssetPaths,
}

impl LocalAssetStore {
    /// Create a new LocalAssetStore, ensuring both asset directories exist.
    pub async fn new(paths: AssetPaths) -> StorageResult<Self> {
        for dir in [paths.media_dir(), paths.thumb_dir()] {
            fs::create_dir_all(dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create asset directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        Ok(LocalAssetStore { paths })
    }

    pub fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn relocate(&self, src: &Path, dst: &Path) -> StorageResult<()> {
        self.ensure_parent_dir(dst).await?;

        // rename is not atomic across volumes; a failure must surface to the
        // caller rather than fall back silently.
        fs::rename(src, dst).await.map_err(|e| {
            StorageError::RelocationFailed(format!(
                "Failed to move {} to {}: {}",
                src.display(),
                dst.display(),
                e
            ))
        })?;

        tracing::info!(
            src = %src.display(),
            dst = %dst.display(),
            "Asset relocation successful"
        );

        Ok(())
    }

    async fn exists(&self, path: &Path) -> StorageResult<bool> {
        Ok(fs::try_exists(path).await.unwrap_or(false))
    }

    async fn delete(&self, path: &Path) -> StorageResult<()> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Asset delete successful");

        Ok(())
    }
}

//! Asset store abstraction
//!
//! This module defines the trait the merge resolver and media service use
//! to move and delete on-disk assets.

use std::path::Path;

use async_trait::async_trait;
use mediapress_core::AppError;
use thiserror::Error;

/// Asset store operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Relocation failed: {0}")]
    RelocationFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for asset store operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::RelocationFailed(msg) => AppError::Relocation(msg),
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Fallible filesystem primitives for media assets.
///
/// `relocate` is not assumed atomic across volumes; a failure surfaces as
/// [`StorageError::RelocationFailed`] and is never retried here. Callers
/// that retry must re-check existence first, since a move may have
/// partially succeeded.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Move a file from `src` to `dst`, creating `dst`'s parent directory
    /// as needed.
    async fn relocate(&self, src: &Path, dst: &Path) -> StorageResult<()>;

    /// Whether a file exists at `path`.
    async fn exists(&self, path: &Path) -> StorageResult<bool>;

    /// Delete the file at `path`. Deleting a missing file is Ok.
    async fn delete(&self, path: &Path) -> StorageResult<()>;
}

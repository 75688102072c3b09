//! Collaborator traits for external subsystems
//!
//! This module provides trait interfaces that let the core work with file
//! ingestion, thumbnail generation, and popularity scoring without depending
//! on their implementations. The surrounding application provides those.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{MediaFile, MediaRecord};

/// Source of an uploaded media file.
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// An uploaded blob.
    Blob { filename: String, bytes: Vec<u8> },
    /// A remote URL to a recognizable audio or video file.
    Remote { url: String },
}

/// Turns an upload into a typed [`MediaFile`], or fails with a validation
/// error (unsupported format, unreachable URL, I/O error).
#[async_trait]
pub trait FileIngestor: Send + Sync {
    async fn ingest(&self, source: UploadSource) -> Result<MediaFile, AppError>;
}

/// Produces the fixed named-size thumbnail set for a record from a source
/// image, or fails with a validation error (unsupported image format,
/// permission error).
#[async_trait]
pub trait ThumbnailGenerator: Send + Sync {
    async fn create_thumbs(
        &self,
        record_id: Uuid,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), AppError>;
}

/// Recomputes a record's popularity score after schedule or metadata
/// changes. The formula is owned by the implementation, not this crate.
#[async_trait]
pub trait PopularityScorer: Send + Sync {
    async fn recompute(&self, record: &mut MediaRecord) -> Result<(), AppError>;
}

/// No-op implementation for deployments without a ranking pipeline.
pub struct NoOpPopularityScorer;

#[async_trait]
impl PopularityScorer for NoOpPopularityScorer {
    async fn recompute(&self, _record: &mut MediaRecord) -> Result<(), AppError> {
        Ok(())
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mediapress_core::constants::THUMB_SIZES;
use mediapress_core::models::{Author, MediaFile, MediaKind, MediaRecord, ThumbnailSet};
use mediapress_core::{
    AppError, AssetConfig, FileIngestor, MemoryRecordStore, NoOpPopularityScorer,
    RecordStore, ThumbnailGenerator, UploadSource,
};
use mediapress_services::{MediaService, MergeService};
use mediapress_storage::{media_file_name, AssetPaths, LocalAssetStore};
use tempfile::TempDir;
use tokio::fs;
use uuid::Uuid;

pub struct TestEnv {
    pub records: Arc<MemoryRecordStore>,
    pub assets: Arc<LocalAssetStore>,
    pub paths: AssetPaths,
    _dir: TempDir,
}

pub async fn setup_env() -> TestEnv {
    let dir = TempDir::new().unwrap();
    let config = AssetConfig::new(dir.path().join("media"), dir.path().join("thumbs"));
    let paths = AssetPaths::new(&config);
    let assets = Arc::new(LocalAssetStore::new(paths.clone()).await.unwrap());
    TestEnv {
        records: Arc::new(MemoryRecordStore::new()),
        assets,
        paths,
        _dir: dir,
    }
}

impl TestEnv {
    pub fn merge_service(&self) -> MergeService {
        MergeService::new(
            self.records.clone(),
            self.assets.clone(),
            self.paths.clone(),
            Arc::new(NoOpPopularityScorer),
        )
    }

    pub fn media_service(
        &self,
        ingestor: Arc<dyn FileIngestor>,
        thumbs: Arc<dyn ThumbnailGenerator>,
    ) -> MediaService {
        MediaService::new(
            self.records.clone(),
            self.assets.clone(),
            self.paths.clone(),
            ingestor,
            thumbs,
            Arc::new(NoOpPopularityScorer),
        )
    }
}

pub fn author() -> Author {
    Author::new("Admin", "admin@example.com")
}

/// Save a fresh record under the given slug and title.
pub async fn seed_record(env: &TestEnv, slug: &str, title: &str) -> MediaRecord {
    let record = MediaRecord::new(slug, title, author(), Utc::now());
    env.records.save(record).await.unwrap()
}

/// Update a saved record's thumbnail set.
pub async fn set_thumbs(env: &TestEnv, record: &mut MediaRecord, thumbs: ThumbnailSet) {
    record.thumbnails = thumbs;
    *record = env.records.save(record.clone()).await.unwrap();
}

/// Attach a stored file to a saved record, writing its bytes on disk under
/// the canonical name for the record's identity.
pub async fn attach_stored_file(
    env: &TestEnv,
    record: &mut MediaRecord,
    kind: MediaKind,
    container: &str,
) -> Uuid {
    let record_id = record.id.expect("record must be saved first");
    let file_id = Uuid::new_v4();
    let name = media_file_name(record_id, file_id, &record.slug, container);
    fs::write(env.paths.media_path(&name), b"payload")
        .await
        .unwrap();
    record.files.push(MediaFile {
        id: file_id,
        kind,
        container: container.to_string(),
        display_name: format!("upload.{}", container),
        file_name: Some(name),
        url: None,
        duration: None,
    });
    *record = env.records.save(record.clone()).await.unwrap();
    file_id
}

/// Write custom thumbnail files for every named size of a record.
pub async fn write_custom_thumbs(env: &TestEnv, record_id: Uuid) {
    for size in THUMB_SIZES {
        fs::write(env.paths.thumb_path(record_id, size), b"jpeg")
            .await
            .unwrap();
    }
}

/// Ingestor that accepts any upload as a stored file of a fixed kind.
pub struct StubIngestor {
    pub kind: MediaKind,
    pub container: &'static str,
}

#[async_trait]
impl FileIngestor for StubIngestor {
    async fn ingest(&self, source: UploadSource) -> Result<MediaFile, AppError> {
        let display_name = match &source {
            UploadSource::Blob { filename, .. } => filename.clone(),
            UploadSource::Remote { url } => {
                url.rsplit('/').next().unwrap_or(url.as_str()).to_string()
            }
        };
        let mut file = MediaFile::stored(
            self.kind,
            self.container,
            display_name,
            format!("ingest_{}.{}", Uuid::new_v4(), self.container),
        );
        file.duration = Some(90);
        Ok(file)
    }
}

/// Ingestor that rejects every upload with a validation error.
pub struct RejectingIngestor;

#[async_trait]
impl FileIngestor for RejectingIngestor {
    async fn ingest(&self, _source: UploadSource) -> Result<MediaFile, AppError> {
        Err(AppError::Validation("Unsupported file type".to_string()))
    }
}

/// Generator that writes a thumbnail file for every named size.
pub struct StubThumbs {
    pub paths: AssetPaths,
}

#[async_trait]
impl ThumbnailGenerator for StubThumbs {
    async fn create_thumbs(
        &self,
        record_id: Uuid,
        _filename: &str,
        bytes: &[u8],
    ) -> Result<(), AppError> {
        for size in THUMB_SIZES {
            fs::write(self.paths.thumb_path(record_id, size), bytes).await?;
        }
        Ok(())
    }
}

/// Generator that fails every request with a validation error.
pub struct FailingThumbs;

#[async_trait]
impl ThumbnailGenerator for FailingThumbs {
    async fn create_thumbs(
        &self,
        _record_id: Uuid,
        filename: &str,
        _bytes: &[u8],
    ) -> Result<(), AppError> {
        Err(AppError::Validation(format!(
            "Unsupported image type: {}",
            filename.rsplit('.').next().unwrap_or("?")
        )))
    }
}

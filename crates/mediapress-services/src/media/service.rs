use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mediapress_core::models::{Author, MediaKind, MediaRecord, ThumbnailSet};
use mediapress_core::slug::{slugify, strip_stub_prefix, stub_slug};
use mediapress_core::validation::{duration_from_seconds, duration_to_seconds};
use mediapress_core::{
    AppError, FileIngestor, PopularityScorer, RecordStore, ThumbnailGenerator, UploadSource,
};
use mediapress_storage::{AssetPaths, AssetStore};
use uuid::Uuid;

/// A single requested change to one of a record's files.
#[derive(Debug, Clone)]
pub enum FileChange {
    SetKind(MediaKind),
    /// Aggregate duration as `"[H:]M:S"` text, validated before applying.
    SetDuration(String),
    Delete,
}

/// Metadata form payload for [`MediaService::save`].
#[derive(Debug, Clone)]
pub struct MediaEdit {
    /// Requested slug; empty or `None` falls back to the title. A stub
    /// marker is stripped, so an explicit save always canonicalizes.
    pub slug: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Author,
    pub description: String,
    pub notes: String,
    pub podcast_id: Option<Uuid>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Publication state change requested by an admin.
#[derive(Debug, Clone)]
pub enum PublicationCommand {
    ReviewComplete,
    /// Approve for publication, going live at `publish_on` (now if unset).
    PublishNow {
        publish_on: Option<DateTime<Utc>>,
    },
    Reschedule {
        publish_on: DateTime<Utc>,
    },
}

#[derive(Debug, Clone)]
pub struct AddFileOutcome {
    pub media: MediaRecord,
    pub file_id: Uuid,
    /// Aggregate duration formatted for display.
    pub duration_text: String,
}

#[derive(Debug, Clone)]
pub struct PublicationOutcome {
    pub media: MediaRecord,
    /// Set when publishing canonicalized a stub slug.
    pub new_slug: Option<String>,
}

/// Mutating operations on media records: file attach/edit, metadata save,
/// thumbnail save, deletion, and publication updates. Every operation
/// finishes by recomputing the record's derived status and persisting it.
pub struct MediaService {
    records: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
    paths: AssetPaths,
    ingestor: Arc<dyn FileIngestor>,
    thumbs: Arc<dyn ThumbnailGenerator>,
    scorer: Arc<dyn PopularityScorer>,
}

impl MediaService {
    pub fn new(
        records: Arc<dyn RecordStore>,
        assets: Arc<dyn AssetStore>,
        paths: AssetPaths,
        ingestor: Arc<dyn FileIngestor>,
        thumbs: Arc<dyn ThumbnailGenerator>,
        scorer: Arc<dyn PopularityScorer>,
    ) -> Self {
        MediaService {
            records,
            assets,
            paths,
            ingestor,
            thumbs,
            scorer,
        }
    }

    /// Attach an uploaded file or remote URL to a record. With no record id
    /// a temporary stub is created first; if ingestion then fails, the
    /// fresh stub is destroyed again.
    pub async fn add_file(
        &self,
        id: Option<Uuid>,
        author: Author,
        source: UploadSource,
    ) -> Result<AddFileOutcome, AppError> {
        let (mut media, fresh) = match id {
            Some(id) => (self.records.fetch(id).await?, false),
            None => (self.create_stub_record(author, None).await?, true),
        };

        let file = match self.ingestor.ingest(source).await {
            Ok(file) => file,
            Err(err) => {
                if fresh {
                    if let Some(stub_id) = media.id {
                        let _ = self.records.destroy(stub_id).await;
                    }
                }
                return Err(err);
            }
        };

        // A stub takes its title from the first real content it receives.
        if media.is_stub() {
            media.title = file.display_name.clone();
            media.slug = self
                .records
                .next_available_slug(&stub_slug(&media.title), media.id)
                .await?;
        }
        if media.thumbnails == ThumbnailSet::Missing {
            media.thumbnails = ThumbnailSet::Default;
        }

        let file_id = file.id;
        media.files.push(file);
        if media.duration == 0 {
            media.duration = media.derived_duration();
        }

        media.update_status(Utc::now());
        let media = self.records.save(media).await?;

        tracing::info!(
            media = ?media.id,
            file = %file_id,
            status = media.status.as_str(),
            "Added media file"
        );

        Ok(AddFileOutcome {
            duration_text: duration_from_seconds(media.duration),
            media,
            file_id,
        })
    }

    /// Apply one change to a record's file. An absent change is reported as
    /// `NoApplicableAction`, an unknown file id as `NotFound`.
    pub async fn edit_file(
        &self,
        id: Uuid,
        file_id: Uuid,
        change: Option<FileChange>,
    ) -> Result<MediaRecord, AppError> {
        let mut media = self.records.fetch(id).await?;
        if media.file(file_id).is_none() {
            return Err(file_not_found(file_id));
        }
        let change = change.ok_or(AppError::NoApplicableAction)?;

        match change {
            FileChange::SetKind(kind) => {
                let file = media
                    .file_mut(file_id)
                    .ok_or_else(|| file_not_found(file_id))?;
                file.kind = kind;
            }
            FileChange::SetDuration(text) => {
                media.duration = duration_to_seconds(&text)?;
            }
            FileChange::Delete => {
                let index = media
                    .files
                    .iter()
                    .position(|f| f.id == file_id)
                    .ok_or_else(|| file_not_found(file_id))?;
                let removed = media.files.remove(index);
                if let Some(name) = removed.file_name {
                    self.assets.delete(&self.paths.media_path(&name)).await?;
                }
            }
        }

        media.update_status(Utc::now());
        self.records.save(media).await
    }

    /// Save descriptive metadata. The slug is re-derived when it changed,
    /// and a stub marker in the requested slug is stripped so editing a
    /// stub canonicalizes it.
    pub async fn save(&self, id: Uuid, edit: MediaEdit) -> Result<MediaRecord, AppError> {
        let mut media = self.records.fetch(id).await?;

        let requested = match edit.slug {
            Some(ref slug) if !slug.is_empty() => slug.clone(),
            _ => edit.title.clone(),
        };
        let requested = strip_stub_prefix(&requested).to_string();
        if slugify(&requested) != media.slug {
            media.slug = self
                .records
                .next_available_slug(&requested, media.id)
                .await?;
        }

        media.title = edit.title;
        media.subtitle = edit.subtitle;
        media.author = edit.author;
        media.description = edit.description;
        media.notes = edit.notes;
        media.podcast_id = edit.podcast_id;
        media.categories = edit.categories;
        media.tags = edit.tags;

        media.update_status(Utc::now());
        self.records.save(media).await
    }

    /// Destroy a record and delete its stored files and custom thumbnails.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let media = self.records.fetch(id).await?;

        let mut doomed: Vec<PathBuf> = media
            .files
            .iter()
            .filter_map(|f| f.file_name.as_deref())
            .map(|name| self.paths.media_path(name))
            .collect();
        if media.has_custom_thumbs() {
            doomed.extend(self.paths.thumb_paths(id).into_values());
        }

        self.records.destroy(id).await?;

        for path in doomed {
            if let Err(err) = self.assets.delete(&path).await {
                tracing::warn!(path = %path.display(), error = %err, "Failed to delete asset");
            }
        }

        tracing::info!(media = %id, "Deleted media record");
        Ok(())
    }

    /// Generate thumbnails from an uploaded image. With no record id a
    /// stub named after the image is created first; on generation failure
    /// a fresh stub is destroyed again and the validation error propagates.
    pub async fn save_thumb(
        &self,
        id: Option<Uuid>,
        author: Author,
        filename: &str,
        bytes: &[u8],
    ) -> Result<MediaRecord, AppError> {
        let (mut media, fresh) = match id {
            Some(id) => (self.records.fetch(id).await?, false),
            None => (self.create_stub_record(author, Some(filename)).await?, true),
        };
        let record_id = media.require_id()?;

        match self.thumbs.create_thumbs(record_id, filename, bytes).await {
            Ok(()) => {
                media.thumbnails = ThumbnailSet::Custom;
                media.update_status(Utc::now());
                self.records.save(media).await
            }
            Err(err) => {
                if fresh {
                    let _ = self.records.destroy(record_id).await;
                }
                Err(err)
            }
        }
    }

    /// Apply a publication state change and recompute the status, which
    /// also verifies the change is currently meaningful (e.g. publishing
    /// an unreviewed record still lands on awaiting-review).
    pub async fn update_publication(
        &self,
        id: Uuid,
        command: PublicationCommand,
    ) -> Result<PublicationOutcome, AppError> {
        let mut media = self.records.fetch(id).await?;
        let mut new_slug = None;
        let now = Utc::now();

        match command {
            PublicationCommand::ReviewComplete => {
                media.reviewed = true;
            }
            PublicationCommand::PublishNow { publish_on } => {
                media.publishable = true;
                media.publish_on = Some(publish_on.unwrap_or(now));
                self.scorer.recompute(&mut media).await?;
                // Publishing sheds the stub marker if the admin kept the
                // derived title.
                if media.is_stub() {
                    let base = strip_stub_prefix(&media.slug).to_string();
                    let slug = self.records.next_available_slug(&base, media.id).await?;
                    media.slug = slug.clone();
                    new_slug = Some(slug);
                }
            }
            PublicationCommand::Reschedule { publish_on } => {
                media.publish_on = Some(publish_on);
                self.scorer.recompute(&mut media).await?;
            }
        }

        media.update_status(now);
        let media = self.records.save(media).await?;

        tracing::info!(
            media = %id,
            status = media.status.as_str(),
            "Updated publication state"
        );

        Ok(PublicationOutcome { media, new_slug })
    }

    /// Create and persist a temporary stub record. The title comes from
    /// the uploaded filename when one is known, otherwise a timestamp.
    async fn create_stub_record(
        &self,
        author: Author,
        filename: Option<&str>,
    ) -> Result<MediaRecord, AppError> {
        let now = Utc::now();
        let title = match filename {
            Some(name) => name.to_string(),
            None => format!("Temporary stub {}", now.format("%Y-%m-%d %H:%M:%S")),
        };
        let slug = self
            .records
            .next_available_slug(&stub_slug(&title), None)
            .await?;
        let media = MediaRecord::new(slug, title, author, now);
        self.records.save(media).await
    }
}

fn file_not_found(file_id: Uuid) -> AppError {
    AppError::NotFound(format!("File \"{}\" does not exist.", file_id))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::slug::is_stub_slug;

use super::file::{MediaFile, MediaKind};
use super::status::{compute_status, PublishStatus};

/// Author credited on a media record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Author {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Which thumbnail set a record currently resolves to.
///
/// `Default` is the shared process-wide placeholder set; `Missing` means
/// generation failed or never ran, so neither the custom nor the default
/// predicate holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailSet {
    #[default]
    Missing,
    Default,
    Custom,
}

/// A media record: the unit the status engine and merge resolver operate on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Assigned by the record store on first save; `None` until then.
    pub id: Option<Uuid>,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub notes: String,
    pub author: Author,
    pub podcast_id: Option<Uuid>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub files: Vec<MediaFile>,
    pub thumbnails: ThumbnailSet,
    /// Aggregate playback length in seconds, set explicitly or from files.
    pub duration: u32,
    pub views: i64,
    pub likes: i64,
    /// Ranking score owned by the popularity scorer, not this crate.
    pub popularity: i64,
    /// Set only by explicit admin action ("Review Complete").
    pub reviewed: bool,
    /// Set only by explicit admin action ("Publish Now").
    pub publishable: bool,
    pub publish_on: Option<DateTime<Utc>>,
    pub publish_until: Option<DateTime<Utc>>,
    /// Derived; recomputed via [`MediaRecord::update_status`] after every
    /// mutation, never assigned directly by callers.
    pub status: PublishStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MediaRecord {
    /// A fresh, unpersisted record with the given slug, title, and author.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        author: Author,
        now: DateTime<Utc>,
    ) -> Self {
        MediaRecord {
            id: None,
            slug: slug.into(),
            title: title.into(),
            subtitle: None,
            description: String::new(),
            notes: String::new(),
            author,
            podcast_id: None,
            categories: Vec::new(),
            tags: Vec::new(),
            files: Vec::new(),
            thumbnails: ThumbnailSet::Missing,
            duration: 0,
            views: 0,
            likes: 0,
            popularity: 0,
            reviewed: false,
            publishable: false,
            publish_on: None,
            publish_until: None,
            status: PublishStatus::AwaitingEncoding,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this record is a temporary stub, derived from its slug.
    pub fn is_stub(&self) -> bool {
        is_stub_slug(&self.slug)
    }

    /// Whether any attached file is playable (audio or video).
    pub fn has_playable_file(&self) -> bool {
        self.files.iter().any(|f| f.kind.is_playable())
    }

    /// Whether this record has its own generated thumbnails.
    pub fn has_custom_thumbs(&self) -> bool {
        self.thumbnails == ThumbnailSet::Custom
    }

    /// Whether this record still shows the shared placeholder thumbnails.
    /// Not the strict negation of [`Self::has_custom_thumbs`]: both are
    /// false when thumbnail generation failed.
    pub fn has_default_thumbs(&self) -> bool {
        self.thumbnails == ThumbnailSet::Default
    }

    pub fn file(&self, file_id: Uuid) -> Option<&MediaFile> {
        self.files.iter().find(|f| f.id == file_id)
    }

    pub fn file_mut(&mut self, file_id: Uuid) -> Option<&mut MediaFile> {
        self.files.iter_mut().find(|f| f.id == file_id)
    }

    /// Sum of per-file durations, used when no explicit duration was set.
    pub fn derived_duration(&self) -> u32 {
        self.files.iter().filter_map(|f| f.duration).sum()
    }

    /// The persistent identifier, or an error for unsaved records.
    pub fn require_id(&self) -> Result<Uuid, AppError> {
        self.id
            .ok_or_else(|| AppError::Internal("record has not been persisted".to_string()))
    }

    /// Recompute the derived publication status from the current facts.
    /// Must be the final step of every mutating operation.
    pub fn update_status(&mut self, now: DateTime<Utc>) {
        self.status = compute_status(self, now);
    }

    /// The kinds present across attached files, for display.
    pub fn file_kinds(&self) -> Vec<MediaKind> {
        let mut kinds: Vec<MediaKind> = Vec::new();
        for file in &self.files {
            if !kinds.contains(&file.kind) {
                kinds.push(file.kind);
            }
        }
        kinds
    }
}

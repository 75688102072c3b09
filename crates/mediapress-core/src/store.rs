//! Record store abstraction
//!
//! Persistence is an external concern; the engine only needs fetch, save,
//! destroy, and unique-slug allocation. `MemoryRecordStore` is a complete
//! in-memory implementation used by tests and embedders.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::MediaRecord;
use crate::slug::normalize_slug;

/// Store for media records. Slug uniqueness must be guaranteed at save time.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch(&self, id: Uuid) -> Result<MediaRecord, AppError>;

    /// Persist the record, assigning an identifier on first save. Fails with
    /// a conflict when another record already owns the slug.
    async fn save(&self, record: MediaRecord) -> Result<MediaRecord, AppError>;

    async fn destroy(&self, id: Uuid) -> Result<(), AppError>;

    /// Derive a slug from `base` that no record other than `excluding`
    /// currently owns, appending `-2`, `-3`, ... as needed.
    async fn next_available_slug(
        &self,
        base: &str,
        excluding: Option<Uuid>,
    ) -> Result<String, AppError>;
}

/// In-memory record store keyed by record id.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<Uuid, MediaRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.records.read().await.contains_key(&id)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch(&self, id: Uuid) -> Result<MediaRecord, AppError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("media record {}", id)))
    }

    async fn save(&self, mut record: MediaRecord) -> Result<MediaRecord, AppError> {
        let mut records = self.records.write().await;
        let id = match record.id {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                record.id = Some(id);
                id
            }
        };
        let taken = records
            .values()
            .any(|other| other.slug == record.slug && other.id != Some(id));
        if taken {
            return Err(AppError::Conflict(format!(
                "slug {:?} is already in use",
                record.slug
            )));
        }
        record.updated_at = Utc::now();
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn destroy(&self, id: Uuid) -> Result<(), AppError> {
        self.records
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("media record {}", id)))
    }

    async fn next_available_slug(
        &self,
        base: &str,
        excluding: Option<Uuid>,
    ) -> Result<String, AppError> {
        let normalized = normalize_slug(base);
        let records = self.records.read().await;
        let taken = |candidate: &str| {
            records
                .values()
                .any(|r| r.slug == candidate && (excluding.is_none() || r.id != excluding))
        };
        if !taken(&normalized) {
            return Ok(normalized);
        }
        for n in 2u32.. {
            let candidate = format!("{}-{}", normalized, n);
            if !taken(&candidate) {
                return Ok(candidate);
            }
        }
        unreachable!("slug probe space exhausted")
    }
}

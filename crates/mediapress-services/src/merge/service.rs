use std::sync::Arc;

use chrono::Utc;
use mediapress_core::models::{MediaRecord, ThumbnailSet};
use mediapress_core::{AppError, PopularityScorer, RecordStore};
use mediapress_storage::{media_file_name, AssetPaths, AssetStore, StorageResult};
use uuid::Uuid;

/// Which merge applies to a `(orig, input)` pair. Checked in declaration
/// order; the first match wins and the ordering is a contract — a stub
/// carrying both files and custom thumbnails is absorbed by its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeScenario {
    /// `input` is a stub with files; `orig` absorbs them.
    FileAbsorption,
    /// `orig` is the stub; `input`'s descriptive fields supersede it.
    MetadataSupersession,
    /// `input` is a stub whose custom thumbnails replace `orig`'s defaults.
    ThumbnailAbsorption,
}

/// Classify which merge scenario, if any, fits the pair.
pub fn classify(orig: &MediaRecord, input: &MediaRecord) -> Option<MergeScenario> {
    if input.is_stub() && !input.files.is_empty() {
        return Some(MergeScenario::FileAbsorption);
    }
    if orig.is_stub() && !input.is_stub() {
        return Some(MergeScenario::MetadataSupersession);
    }
    if input.is_stub() && orig.has_default_thumbs() && input.has_custom_thumbs() {
        return Some(MergeScenario::ThumbnailAbsorption);
    }
    None
}

/// Result of a merge attempt. `Rejected` is a normal negative outcome, not
/// an error.
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    Merged {
        record: MediaRecord,
        absorbed_files: Vec<Uuid>,
    },
    Rejected {
        reason: String,
    },
}

/// Resolves the case where two placeholder records were created
/// concurrently for what is really one logical upload.
pub struct MergeService {
    records: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
    paths: AssetPaths,
    scorer: Arc<dyn PopularityScorer>,
}

impl MergeService {
    pub fn new(
        records: Arc<dyn RecordStore>,
        assets: Arc<dyn AssetStore>,
        paths: AssetPaths,
        scorer: Arc<dyn PopularityScorer>,
    ) -> Self {
        MergeService {
            records,
            assets,
            paths,
            scorer,
        }
    }

    /// Merge `input` into `orig`. Exactly one of three scenarios applies;
    /// when none fits, the pair is left untouched and the outcome is
    /// `Rejected`. On success `input` is destroyed, `orig` survives with a
    /// freshly recomputed status.
    pub async fn merge_stubs(
        &self,
        orig_id: Uuid,
        input_id: Uuid,
    ) -> Result<MergeOutcome, AppError> {
        if orig_id == input_id {
            return Err(AppError::Validation(
                "Cannot merge a media record with itself.".to_string(),
            ));
        }

        let mut orig = self.records.fetch(orig_id).await?;
        let input = self.records.fetch(input_id).await?;

        let scenario = match classify(&orig, &input) {
            Some(scenario) => scenario,
            None => {
                tracing::debug!(orig = %orig_id, input = %input_id, "No merge operation fits");
                return Ok(MergeOutcome::Rejected {
                    reason: "No merge operation fits.".to_string(),
                });
            }
        };

        let absorbed_files = match scenario {
            MergeScenario::FileAbsorption => {
                let absorbed = self.absorb_files(&mut orig, &input).await?;
                self.records.destroy(input_id).await?;
                absorbed
            }
            MergeScenario::MetadataSupersession => {
                self.supersede_metadata(&mut orig, &input).await?;
                Vec::new()
            }
            MergeScenario::ThumbnailAbsorption => {
                if let Err(err) = self.relocate_thumbs(input_id, orig_id).await {
                    tracing::warn!(
                        orig = %orig_id,
                        input = %input_id,
                        error = %err,
                        "Thumbnail merge aborted, records left untouched"
                    );
                    return Ok(MergeOutcome::Rejected {
                        reason: format!("Thumbnail relocation failed: {}", err),
                    });
                }
                orig.thumbnails = ThumbnailSet::Custom;
                self.records.destroy(input_id).await?;
                Vec::new()
            }
        };

        orig.update_status(Utc::now());
        let record = self.records.save(orig).await?;

        tracing::info!(
            orig = %orig_id,
            input = %input_id,
            scenario = ?scenario,
            absorbed_files = absorbed_files.len(),
            status = record.status.as_str(),
            "Merged stub media records"
        );

        Ok(MergeOutcome::Merged {
            record,
            absorbed_files,
        })
    }

    /// Reassign every file owned by `input` to `orig`, renaming stored
    /// files to `orig`'s identity. Each file commits independently: a
    /// failed rename keeps that file under its original name rather than
    /// losing it.
    async fn absorb_files(
        &self,
        orig: &mut MediaRecord,
        input: &MediaRecord,
    ) -> Result<Vec<Uuid>, AppError> {
        let orig_id = orig.require_id()?;
        let mut absorbed = Vec::with_capacity(input.files.len());

        for file in &input.files {
            let mut file = file.clone();
            if let Some(old_name) = file.file_name.clone() {
                let new_name = media_file_name(orig_id, file.id, &orig.slug, &file.container);
                let src = self.paths.media_path(&old_name);
                let dst = self.paths.media_path(&new_name);
                match self.assets.relocate(&src, &dst).await {
                    Ok(()) => file.file_name = Some(new_name),
                    Err(err) => {
                        tracing::warn!(
                            file = %file.id,
                            name = %old_name,
                            error = %err,
                            "Keeping absorbed file under its original name"
                        );
                    }
                }
            }
            absorbed.push(file.id);
            orig.files.push(file);
        }

        Ok(absorbed)
    }

    /// Copy `input`'s descriptive fields onto the stub `orig`. `input` is
    /// destroyed first so `orig` can take over its slug.
    async fn supersede_metadata(
        &self,
        orig: &mut MediaRecord,
        input: &MediaRecord,
    ) -> Result<(), AppError> {
        self.records.destroy(input.require_id()?).await?;

        orig.podcast_id = input.podcast_id;
        orig.title = input.title.clone();
        orig.subtitle = input.subtitle.clone();
        orig.slug = input.slug.clone();
        orig.author = input.author.clone();
        orig.description = input.description.clone();
        orig.notes = input.notes.clone();
        orig.duration = input.duration;
        orig.views = input.views;
        orig.likes = input.likes;
        orig.publish_on = input.publish_on;
        orig.publish_until = input.publish_until;
        orig.categories = input.categories.clone();
        orig.tags = input.tags.clone();

        self.scorer.recompute(orig).await?;
        Ok(())
    }

    /// Move every named thumbnail size from `from`'s canonical paths to
    /// `to`'s. All-or-nothing: on a mid-set failure, already-moved sizes
    /// are moved back so a partial thumbnail set never survives.
    async fn relocate_thumbs(&self, from: Uuid, to: Uuid) -> StorageResult<()> {
        let mut moved: Vec<(std::path::PathBuf, std::path::PathBuf)> = Vec::new();

        for (size, dst) in self.paths.thumb_paths(to) {
            let src = self.paths.thumb_path(from, size);
            match self.assets.relocate(&src, &dst).await {
                Ok(()) => moved.push((src, dst)),
                Err(err) => {
                    for (orig_src, orig_dst) in moved.iter().rev() {
                        if let Err(undo_err) = self.assets.relocate(orig_dst, orig_src).await {
                            tracing::error!(
                                src = %orig_dst.display(),
                                dst = %orig_src.display(),
                                error = %undo_err,
                                "Failed to restore thumbnail while rolling back merge"
                            );
                        }
                    }
                    return Err(err);
                }
            }
        }

        Ok(())
    }
}

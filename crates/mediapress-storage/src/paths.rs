//! Canonical path derivation for media files and thumbnails.
//!
//! Pure functions of record/file identity: no I/O, deterministic, and
//! collision-free across distinct `(record_id, file_id)` pairs. The actual
//! moves happen through [`crate::AssetStore`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mediapress_core::constants::{DEFAULT_THUMB_STEM, THUMB_EXT, THUMB_SIZES};
use mediapress_core::AssetConfig;
use uuid::Uuid;

/// On-disk name for a stored media file: `{record}_{file}_{slug}.{container}`.
///
/// Embedding both ids keeps names unique even when two records share a slug
/// prefix; the slug keeps names human-readable.
pub fn media_file_name(record_id: Uuid, file_id: Uuid, slug: &str, container: &str) -> String {
    format!("{}_{}_{}.{}", record_id, file_id, slug, container)
}

/// On-disk name for one thumbnail size of a record.
pub fn thumb_name(record_id: Uuid, size: &str) -> String {
    format!("{}_{}.{}", record_id, size, THUMB_EXT)
}

/// Resolves canonical asset paths under the configured directories.
#[derive(Clone, Debug)]
pub struct AssetPaths {
    media_dir: PathBuf,
    thumb_dir: PathBuf,
}

impl AssetPaths {
    pub fn new(config: &AssetConfig) -> Self {
        AssetPaths {
            media_dir: config.media_dir.clone(),
            thumb_dir: config.thumb_dir.clone(),
        }
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    pub fn thumb_dir(&self) -> &Path {
        &self.thumb_dir
    }

    /// Canonical path for a media file owned by `record_id`.
    pub fn media_file_path(
        &self,
        record_id: Uuid,
        file_id: Uuid,
        slug: &str,
        container: &str,
    ) -> PathBuf {
        self.media_dir
            .join(media_file_name(record_id, file_id, slug, container))
    }

    /// Path of an already-named stored file.
    pub fn media_path(&self, file_name: &str) -> PathBuf {
        self.media_dir.join(file_name)
    }

    /// Canonical path for one thumbnail size of a record.
    pub fn thumb_path(&self, record_id: Uuid, size: &str) -> PathBuf {
        self.thumb_dir.join(thumb_name(record_id, size))
    }

    /// Canonical paths for every named thumbnail size of a record.
    pub fn thumb_paths(&self, record_id: Uuid) -> BTreeMap<&'static str, PathBuf> {
        THUMB_SIZES
            .iter()
            .map(|size| (*size, self.thumb_path(record_id, size)))
            .collect()
    }

    /// The process-wide placeholder thumbnail set, shared by every record
    /// without custom thumbnails. Read-only by convention.
    pub fn default_thumb_paths(&self) -> BTreeMap<&'static str, PathBuf> {
        THUMB_SIZES
            .iter()
            .map(|size| {
                let name = format!("{}_{}.{}", DEFAULT_THUMB_STEM, size, THUMB_EXT);
                (*size, self.thumb_dir.join(name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> AssetPaths {
        AssetPaths::new(&AssetConfig::new("/srv/media", "/srv/thumbs"))
    }

    #[test]
    fn test_media_file_name_format() {
        let record = Uuid::new_v4();
        let file = Uuid::new_v4();
        let name = media_file_name(record, file, "episode-1", "mp4");
        assert_eq!(name, format!("{}_{}_episode-1.mp4", record, file));
    }

    #[test]
    fn test_media_file_paths_collision_free() {
        let p = paths();
        let record_a = Uuid::new_v4();
        let record_b = Uuid::new_v4();
        let file_a = Uuid::new_v4();
        let file_b = Uuid::new_v4();
        // Same slug and container everywhere; identity alone must separate.
        let mut seen = std::collections::HashSet::new();
        for (r, f) in [
            (record_a, file_a),
            (record_a, file_b),
            (record_b, file_a),
            (record_b, file_b),
        ] {
            assert!(seen.insert(p.media_file_path(r, f, "episode", "mp4")));
        }
    }

    #[test]
    fn test_thumb_paths_cover_all_sizes() {
        let p = paths();
        let record = Uuid::new_v4();
        let thumbs = p.thumb_paths(record);
        assert_eq!(thumbs.len(), THUMB_SIZES.len());
        for size in THUMB_SIZES {
            let path = &thumbs[size];
            assert!(path.starts_with("/srv/thumbs"));
            assert_eq!(
                path.file_name().unwrap().to_str().unwrap(),
                format!("{}_{}.jpg", record, size)
            );
        }
    }

    #[test]
    fn test_default_thumbs_are_record_independent() {
        let p = paths();
        let defaults = p.default_thumb_paths();
        assert_eq!(defaults.len(), THUMB_SIZES.len());
        assert_eq!(defaults["s"], PathBuf::from("/srv/thumbs/default_s.jpg"));
        // Shared set: no record id in any default path.
        let record = Uuid::new_v4();
        for path in defaults.values() {
            assert!(!path.to_str().unwrap().contains(&record.to_string()));
        }
    }
}

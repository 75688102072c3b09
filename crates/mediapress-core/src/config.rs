//! Configuration module
//!
//! Asset directory configuration for the media and thumbnail stores, read
//! from the environment with sensible defaults for local development.

use std::env;
use std::path::PathBuf;

const DEFAULT_MEDIA_DIR: &str = "data/media";
const DEFAULT_THUMB_DIR: &str = "data/thumbs";

/// On-disk locations for media files and thumbnails.
#[derive(Clone, Debug)]
pub struct AssetConfig {
    pub media_dir: PathBuf,
    pub thumb_dir: PathBuf,
}

impl AssetConfig {
    /// Load from `MEDIAPRESS_MEDIA_DIR` / `MEDIAPRESS_THUMB_DIR`, falling
    /// back to the defaults. A `.env` file is honored when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let media_dir =
            env::var("MEDIAPRESS_MEDIA_DIR").unwrap_or_else(|_| DEFAULT_MEDIA_DIR.to_string());
        let thumb_dir =
            env::var("MEDIAPRESS_THUMB_DIR").unwrap_or_else(|_| DEFAULT_THUMB_DIR.to_string());

        AssetConfig {
            media_dir: PathBuf::from(media_dir),
            thumb_dir: PathBuf::from(thumb_dir),
        }
    }

    /// Build a config rooted at explicit directories (tests, embedding).
    pub fn new(media_dir: impl Into<PathBuf>, thumb_dir: impl Into<PathBuf>) -> Self {
        AssetConfig {
            media_dir: media_dir.into(),
            thumb_dir: thumb_dir.into(),
        }
    }
}

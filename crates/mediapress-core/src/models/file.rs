use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of content a media file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Captions,
}

impl MediaKind {
    /// Whether files of this kind count toward the record being playable.
    /// Captions alone never make a record playable.
    pub fn is_playable(&self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio)
    }
}

/// One file belonging to a media record.
///
/// A file is either stored on disk (`file_name` set, named by the path
/// policy) or referenced by URL (`file_name` unset). Both forms survive a
/// stub merge; only stored files are relocated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: Uuid,
    pub kind: MediaKind,
    /// Container/extension, e.g. "mp4", "mp3".
    pub container: String,
    /// Human-readable name shown in listings, usually the upload filename.
    pub display_name: String,
    /// On-disk file name, when the file is stored locally.
    pub file_name: Option<String>,
    /// Source URL, when the file is remote.
    pub url: Option<String>,
    /// Playback length contribution in seconds, when known.
    pub duration: Option<u32>,
}

impl MediaFile {
    /// A locally stored file.
    pub fn stored(
        kind: MediaKind,
        container: impl Into<String>,
        display_name: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        MediaFile {
            id: Uuid::new_v4(),
            kind,
            container: container.into(),
            display_name: display_name.into(),
            file_name: Some(file_name.into()),
            url: None,
            duration: None,
        }
    }

    /// A remote, URL-backed file.
    pub fn remote(
        kind: MediaKind,
        container: impl Into<String>,
        display_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        MediaFile {
            id: Uuid::new_v4(),
            kind,
            container: container.into(),
            display_name: display_name.into(),
            file_name: None,
            url: Some(url.into()),
            duration: None,
        }
    }
}

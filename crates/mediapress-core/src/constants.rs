//! Shared constants.

/// Named thumbnail sizes every record carries. All path derivation and
/// thumbnail generation must use this set for consistency.
pub const THUMB_SIZES: [&str; 3] = ["s", "m", "l"];

/// File extension for generated thumbnails.
pub const THUMB_EXT: &str = "jpg";

/// Filename stem of the process-wide placeholder thumbnail set.
pub const DEFAULT_THUMB_STEM: &str = "default";

//! Slug conventions, including the temporary-stub marker.
//!
//! A record whose slug starts with [`STUB_PREFIX`] is a placeholder created
//! implicitly when a file or thumbnail was uploaded before any descriptive
//! metadata existed. Stub-ness is derived from the slug alone; there is no
//! separate flag to fall out of sync.

use std::sync::OnceLock;

use regex::Regex;

/// Reserved slug prefix marking a temporary stub record.
pub const STUB_PREFIX: &str = "_stub_";

/// Whether the given slug marks a temporary stub record.
pub fn is_stub_slug(slug: &str) -> bool {
    slug.starts_with(STUB_PREFIX)
}

/// Strip the stub marker from a slug. Non-stub slugs pass through unchanged.
pub fn strip_stub_prefix(slug: &str) -> &str {
    slug.strip_prefix(STUB_PREFIX).unwrap_or(slug)
}

/// Build a stub slug from a base string (the file title or a timestamp).
pub fn stub_slug(base: &str) -> String {
    format!("{}{}", STUB_PREFIX, base)
}

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"))
}

/// Reduce arbitrary text to URL-safe slug form: lowercase, runs of anything
/// outside `[a-z0-9]` collapsed to a single `-`, no leading/trailing `-`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let slug = non_slug_chars().replace_all(&lowered, "-");
    slug.trim_matches('-').to_string()
}

/// Normalize a requested slug while keeping the stub marker intact, so a
/// stub slug stays recognizable as one after normalization.
pub fn normalize_slug(requested: &str) -> String {
    match requested.strip_prefix(STUB_PREFIX) {
        Some(rest) => stub_slug(&slugify(rest)),
        None => slugify(requested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_prefix_roundtrip() {
        let slug = stub_slug("episode-5");
        assert!(is_stub_slug(&slug));
        assert_eq!(strip_stub_prefix(&slug), "episode-5");
    }

    #[test]
    fn test_non_stub_passthrough() {
        assert!(!is_stub_slug("episode-5"));
        assert_eq!(strip_stub_prefix("episode-5"), "episode-5");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Episode 5: The Return!"), "episode-5-the-return");
        assert_eq!(slugify("  --spaced--  "), "spaced");
        assert_eq!(slugify("2024-01-01 00:00:00"), "2024-01-01-00-00-00");
    }

    #[test]
    fn test_normalize_preserves_stub_marker() {
        let normalized = normalize_slug("_stub_2024-01-01 00:00:00");
        assert!(is_stub_slug(&normalized));
        assert_eq!(normalized, "_stub_2024-01-01-00-00-00");
        assert_eq!(normalize_slug("Plain Title"), "plain-title");
    }
}

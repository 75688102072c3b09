use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaRecord;

/// Derived publication state of a media record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    /// Reviewed but not yet approved for publication.
    Draft,
    /// No playable file is attached yet.
    AwaitingEncoding,
    /// Has a playable file but review has not been completed.
    AwaitingReview,
    /// Approved, scheduled to go live in the future.
    AwaitingPublication,
    Published,
    /// Was published, now withdrawn or past its end date.
    Unpublished,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::AwaitingEncoding => "awaiting_encoding",
            PublishStatus::AwaitingReview => "awaiting_review",
            PublishStatus::AwaitingPublication => "awaiting_publication",
            PublishStatus::Published => "published",
            PublishStatus::Unpublished => "unpublished",
        }
    }
}

/// Compute the publication status for the record's current fact set.
///
/// Pure and total: any fact combination yields a status, including ones an
/// admin UI would consider nonsensical. The first matching rule wins, and
/// the rule order is a contract:
///
/// 1. no playable file
/// 2. not reviewed
/// 3. not marked publishable
/// 4. scheduled in the future
/// 5. past the end of its publication window
/// 6. published
pub fn compute_status(record: &MediaRecord, now: DateTime<Utc>) -> PublishStatus {
    if !record.has_playable_file() {
        return PublishStatus::AwaitingEncoding;
    }
    if !record.reviewed {
        return PublishStatus::AwaitingReview;
    }
    if !record.publishable {
        return PublishStatus::Draft;
    }
    if let Some(publish_on) = record.publish_on {
        if publish_on > now {
            return PublishStatus::AwaitingPublication;
        }
    }
    if let Some(publish_until) = record.publish_until {
        if publish_until < now {
            return PublishStatus::Unpublished;
        }
    }
    PublishStatus::Published
}

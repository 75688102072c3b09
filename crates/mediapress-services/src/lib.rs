//! Mediapress services
//!
//! `merge` resolves two concurrently-created records for one logical upload
//! into a single survivor; `media` hosts the mutating operations of the
//! admin surface. Every mutation ends by recomputing the record's derived
//! publication status.
//!
//! Neither service serializes access: callers must hold a per-record lock
//! (or route through a single-writer queue keyed by record id) across each
//! mutating call and its durable apply, because all operations read and
//! write whole records with no optimistic-concurrency check.

pub mod media;
pub mod merge;

pub use media::{
    AddFileOutcome, FileChange, MediaEdit, MediaService, PublicationCommand, PublicationOutcome,
};
pub use merge::{classify, MergeOutcome, MergeScenario, MergeService};

mod service;

pub use service::{classify, MergeOutcome, MergeScenario, MergeService};

mod service;

pub use service::{
    AddFileOutcome, FileChange, MediaEdit, MediaService, PublicationCommand, PublicationOutcome,
};

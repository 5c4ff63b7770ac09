use std::path::PathBuf;
use thiserror::Error;

use crate::publisher::PublishError;

/// Errors that terminate an indexing run.
///
/// Warning conditions (missing anchors, duplicate objectIDs, untagged
/// sections) are not errors; they are logged and counted in
/// [`crate::record::RunStats`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("documentation directory {} does not exist", .0.display())]
    MissingDocsDir(PathBuf),

    #[error("invalid container selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("failed to read page {}: {source}", .path.display())]
    ReadPage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("target index is unavailable: {0}")]
    IndexUnavailable(PublishError),

    #[error("failed to apply index settings: {0}")]
    ApplySettings(PublishError),

    #[error("batch upsert failed after {published} published records: {error}")]
    Publish {
        published: usize,
        error: PublishError,
    },
}

//! # publisher: interface for the hosted search index
//!
//! This module defines the [`Publisher`] trait plus the supporting types for
//! configuring a remote search index and upserting record batches into it.
//!
//! ## Interface & Extensibility
//! - Implement [`Publisher`] to target a new index backend (HTTP client,
//!   dry-run printer, test mock).
//! - All methods are async, returning results with boxed error types.
//! - Error handling is uniform: implementors convert every meaningful
//!   upstream failure into a boxed trait object.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.
//!
//! ## Semantics
//! - `save_objects` is an upsert keyed by objectID: writing the same id
//!   twice overwrites, so re-emitted snapshots of a growing section converge
//!   to the final state. A backend without idempotent upsert-by-key is not a
//!   valid target.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use tracing::{debug, info};

use crate::record::SearchRecord;

/// Maximum records per upsert call, unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 100;

pub type PublishError = Box<dyn std::error::Error + Send + Sync>;

/// One-time search settings pushed to the target index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSettings {
    pub ranking: Vec<String>,
    pub custom_ranking: Vec<String>,
    pub searchable_attributes: Vec<String>,
    pub attributes_to_snippet: Vec<String>,
    pub snippet_ellipsis_text: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            ranking: [
                "typo", "geo", "words", "filters", "proximity", "attribute", "exact", "custom",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            custom_ranking: vec!["desc(level)".to_string(), "desc(ranking)".to_string()],
            searchable_attributes: vec![
                "title".to_string(),
                "content".to_string(),
                "unordered(tags)".to_string(),
            ],
            attributes_to_snippet: vec!["title:10".to_string(), "content:10".to_string()],
            snippet_ellipsis_text: "…".to_string(),
        }
    }
}

/// Trait for configuring and writing to the target search index.
///
/// Implemented by the real networked client in the CLI crate, by
/// [`DryRunPublisher`], and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Confirms the target index exists. A missing index is a fatal startup
    /// condition; settings must never be applied to an index created as a
    /// side effect.
    async fn verify_index(&self) -> Result<(), PublishError>;

    /// Applies the one-time search settings to the index.
    async fn configure_index(&self, settings: &IndexSettings) -> Result<(), PublishError>;

    /// Upserts one batch of records, keyed by objectID.
    async fn save_objects(&self, records: &[SearchRecord]) -> Result<(), PublishError>;
}

/// A failed batch upsert, carrying how many records of the slice had
/// already landed in earlier batches.
#[derive(Debug)]
pub struct BatchFailure {
    pub published: usize,
    pub error: PublishError,
}

/// Splits `records` into fixed-size batches and upserts them sequentially,
/// propagating the first failure. Returns the number of batches written.
pub async fn publish_in_batches<P>(
    publisher: &P,
    records: &[SearchRecord],
    batch_size: usize,
) -> Result<usize, BatchFailure>
where
    P: Publisher + ?Sized,
{
    let batch_size = batch_size.max(1);
    let mut batches = 0;
    let mut published = 0;
    for chunk in records.chunks(batch_size) {
        publisher
            .save_objects(chunk)
            .await
            .map_err(|error| BatchFailure { published, error })?;
        batches += 1;
        published += chunk.len();
        debug!(batch = batches, records = chunk.len(), "batch upserted");
    }
    Ok(batches)
}

/// Publisher that prints records to stdout instead of transmitting them.
#[derive(Debug, Default)]
pub struct DryRunPublisher;

impl DryRunPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Publisher for DryRunPublisher {
    async fn verify_index(&self) -> Result<(), PublishError> {
        info!("dry run: skipping index existence check");
        Ok(())
    }

    async fn configure_index(&self, settings: &IndexSettings) -> Result<(), PublishError> {
        info!(?settings, "dry run: would apply index settings");
        Ok(())
    }

    async fn save_objects(&self, records: &[SearchRecord]) -> Result<(), PublishError> {
        for record in records {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        info!(records = records.len(), "dry run: printed batch");
        Ok(())
    }
}

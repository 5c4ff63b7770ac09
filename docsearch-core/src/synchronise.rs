//! High-level pipeline: orchestrates discover → extract → build → publish
//! for every documentation page.
//!
//! The run is strictly sequential: one page is fully loaded, extracted,
//! built and published before the next begins, and within a page each batch
//! is awaited before the next is sent. The only state crossing page
//! boundaries is the duplicate-id tracker and the warning counters in
//! [`RunStats`], created once per run.
//!
//! # Error Handling
//! A missing target index and any batch failure are fatal and returned
//! immediately; there is no retry and no partial-publish rollback. Warning
//! conditions are logged, counted and otherwise ignored.
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]
//! - Supporting types: [`SyncReport`], [`crate::config::SyncConfig`].

use std::fs;

use tracing::{error, info};

use crate::config::SyncConfig;
use crate::discover::discover_pages;
use crate::document::{extract_records, DocumentMarkers};
use crate::error::SyncError;
use crate::publisher::{publish_in_batches, IndexSettings, Publisher};
use crate::record::{PageContext, RunStats};

/// Outcome of a completed run, for the final summary and downstream audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub pages_indexed: usize,
    pub records_published: usize,
    pub batches: usize,
    pub duplicate_ids: usize,
    pub missing_anchors: usize,
    pub untagged_sections: usize,
}

/// Entrypoint: index every discovered page into the publisher's target.
pub async fn synchronise<P>(config: &SyncConfig, publisher: &P) -> Result<SyncReport, SyncError>
where
    P: Publisher,
{
    info!("starting search index synchronisation");

    if let Err(e) = publisher.verify_index().await {
        error!(error = %e, "target index is unavailable");
        return Err(SyncError::IndexUnavailable(e));
    }
    publisher
        .configure_index(&IndexSettings::default())
        .await
        .map_err(SyncError::ApplySettings)?;
    info!("index settings applied");

    let markers = DocumentMarkers::new(&config.container_class, &config.exclude_classes)?;
    let pages = discover_pages(&config.docs_dir, &config.base_url)?;
    info!(pages = pages.len(), "discovered documentation pages");

    let mut stats = RunStats::new();
    let mut records_published = 0usize;
    let mut batches = 0usize;

    for page in &pages {
        let html = fs::read_to_string(&page.path).map_err(|source| SyncError::ReadPage {
            path: page.path.clone(),
            source,
        })?;
        let ctx = PageContext {
            page_url: page.page_url.clone(),
            section: config.section.clone(),
            ranking: config.ranking,
        };
        let page_records = extract_records(&html, &markers, &ctx, &mut stats);

        match publish_in_batches(publisher, &page_records, config.batch_size).await {
            Ok(page_batches) => {
                batches += page_batches;
                records_published += page_records.len();
                info!(
                    page = %page.page_url,
                    records = page_records.len(),
                    "page indexed"
                );
            }
            Err(failure) => {
                error!(page = %page.page_url, error = %failure.error, "batch upsert failed, aborting run");
                return Err(SyncError::Publish {
                    published: records_published + failure.published,
                    error: failure.error,
                });
            }
        }
    }

    let report = SyncReport {
        pages_indexed: pages.len(),
        records_published,
        batches,
        duplicate_ids: stats.duplicate_ids,
        missing_anchors: stats.missing_anchors,
        untagged_sections: stats.untagged_sections,
    };
    info!(
        pages = report.pages_indexed,
        records = report.records_published,
        batches = report.batches,
        duplicate_ids = report.duplicate_ids,
        "synchronisation complete: {} files processed",
        report.pages_indexed
    );
    Ok(report)
}

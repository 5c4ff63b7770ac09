use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::publisher::DEFAULT_BATCH_SIZE;

/// Runtime configuration for one indexing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Directory holding the generated HTML documentation pages.
    pub docs_dir: PathBuf,
    /// Public base URL of the documentation site, used to derive page URLs.
    pub base_url: String,
    /// Section label attached to every record (e.g. "docs").
    pub section: String,
    /// Static ranking weight attached to every record.
    pub ranking: i64,
    /// Maximum number of records per upsert call.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Class marking the subtrees eligible for extraction.
    #[serde(default = "default_container_class")]
    pub container_class: String,
    /// Classes whose subtrees are stripped before extraction.
    #[serde(default = "default_exclude_classes")]
    pub exclude_classes: Vec<String>,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_container_class() -> String {
    "content".to_string()
}

fn default_exclude_classes() -> Vec<String> {
    vec!["noindex".to_string(), "highlight".to_string()]
}

impl SyncConfig {
    pub fn trace_loaded(&self) {
        info!(
            docs_dir = %self.docs_dir.display(),
            base_url = %self.base_url,
            section = %self.section,
            batch_size = self.batch_size,
            "Loaded SyncConfig"
        );
        debug!(?self, "SyncConfig loaded (full debug)");
    }
}

/// `load_config` module: loads the static YAML config into the core
/// [`SyncConfig`]. Secrets (application id, admin key, index name) never
/// appear here; they come from the environment when the networked client is
/// constructed.
///
/// # Responsibilities
/// - Parse user-supplied YAML configuration files into type-safe structs
/// - Apply defaults for the optional marker selectors and batch size
/// - Ensure robust error messages for CLI and tests: any failure in loading
///   must result in clear diagnostics.
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich
/// diagnostics, and are surfaced at the CLI boundary.
use std::fs;
use std::path::Path;

use anyhow::Result;
use docsearch_core::config::SyncConfig;
use docsearch_core::publisher::DEFAULT_BATCH_SIZE;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
struct RawConfig {
    index: IndexSection,
    #[serde(default)]
    selectors: SelectorsSection,
}

#[derive(Debug, Deserialize)]
struct IndexSection {
    docs_dir: PathBuf,
    base_url: String,
    section: String,
    ranking: i64,
    #[serde(default = "default_batch_size")]
    batch_size: usize,
}

#[derive(Debug, Deserialize)]
struct SelectorsSection {
    #[serde(default = "default_container")]
    container: String,
    #[serde(default = "default_exclude")]
    exclude: Vec<String>,
}

impl Default for SelectorsSection {
    fn default() -> Self {
        Self {
            container: default_container(),
            exclude: default_exclude(),
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_container() -> String {
    "content".to_string()
}

fn default_exclude() -> Vec<String> {
    vec!["noindex".to_string(), "highlight".to_string()]
}

/// Loads a static YAML config file and maps it to the core [`SyncConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SyncConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    Ok(SyncConfig {
        docs_dir: raw.index.docs_dir,
        base_url: raw.index.base_url,
        section: raw.index.section,
        ranking: raw.index.ranking,
        batch_size: raw.index.batch_size,
        container_class: raw.selectors.container,
        exclude_classes: raw.selectors.exclude,
    })
}

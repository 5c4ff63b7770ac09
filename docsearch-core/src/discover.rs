//! Page discovery: finds the generated HTML files beneath the docs
//! directory and derives the public URL each one is served at.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::SyncError;

/// One documentation page selected for indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPage {
    pub path: PathBuf,
    pub page_url: String,
}

/// Collects every `.html` file beneath `docs_dir`, sorted by path so runs
/// are deterministic.
pub fn discover_pages(docs_dir: &Path, base_url: &str) -> Result<Vec<DiscoveredPage>, SyncError> {
    if !docs_dir.is_dir() {
        return Err(SyncError::MissingDocsDir(docs_dir.to_path_buf()));
    }
    let mut pages = Vec::new();
    for entry in WalkDir::new(docs_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("html") {
            pages.push(DiscoveredPage {
                path: path.to_path_buf(),
                page_url: page_url_for(docs_dir, path, base_url),
            });
        }
    }
    pages.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(pages = pages.len(), docs_dir = %docs_dir.display(), "discovered pages");
    Ok(pages)
}

/// Maps a file path to its served URL. A trailing `index.html` collapses to
/// the directory URL, matching how the site publishes pretty URLs; other
/// filenames are kept verbatim.
fn page_url_for(docs_dir: &Path, path: &Path, base_url: &str) -> String {
    let rel = path.strip_prefix(docs_dir).unwrap_or(path);
    let mut url = base_url.trim_end_matches('/').to_string();
    for component in rel.components() {
        url.push('/');
        url.push_str(&component.as_os_str().to_string_lossy());
    }
    // Only a final path component that is exactly `index.html` collapses;
    // names merely ending in it (e.g. `reindex.html`) are real pages.
    match url.strip_suffix("/index.html") {
        Some(stripped) => format!("{stripped}/"),
        None => url,
    }
}

//! Document loading: parses one HTML page and extracts search records from
//! every container-marked subtree.

use scraper::{ElementRef, Html, Selector};

use crate::error::SyncError;
use crate::outline::{OutlineItem, OutlineItems};
use crate::record::{build_records, PageContext, RunStats, SearchRecord};

/// Compiled markers delimiting what gets indexed within a page.
#[derive(Debug, Clone)]
pub struct DocumentMarkers {
    container: Selector,
    container_class: String,
    exclude: Vec<String>,
}

impl DocumentMarkers {
    /// Builds the container selector from a class name and keeps the
    /// excluded class list for traversal-time stripping.
    pub fn new(container_class: &str, exclude_classes: &[String]) -> Result<Self, SyncError> {
        let selector = format!(".{container_class}");
        let container = Selector::parse(&selector).map_err(|e| SyncError::Selector {
            selector: selector.clone(),
            message: format!("{e:?}"),
        })?;
        Ok(Self {
            container,
            container_class: container_class.to_string(),
            exclude: exclude_classes.to_vec(),
        })
    }
}

/// A container nested inside another container is already covered by its
/// ancestor's traversal; selecting it again would duplicate its records.
fn has_container_ancestor(root: &ElementRef<'_>, container_class: &str) -> bool {
    root.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| {
            ancestor
                .value()
                .classes()
                .any(|class| class == container_class)
        })
}

/// Parses a page and builds its records, one container at a time, in
/// document order.
///
/// `scraper`'s tree is immutable, so excluded regions are skipped during
/// traversal rather than removed up front; the resulting records are the
/// same.
pub fn extract_records(
    html: &str,
    markers: &DocumentMarkers,
    ctx: &PageContext,
    stats: &mut RunStats,
) -> Vec<SearchRecord> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();
    for root in document.select(&markers.container) {
        if has_container_ancestor(&root, &markers.container_class) {
            continue;
        }
        let items: Vec<OutlineItem> = OutlineItems::new(root, &markers.exclude).collect();
        records.extend(build_records(ctx, items, stats));
    }
    records
}

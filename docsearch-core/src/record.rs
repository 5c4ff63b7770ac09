//! Record building: folds an outline item sequence into search records with
//! breadcrumb tags.
//!
//! The fold keeps one active record plus the list of emitted snapshots. A
//! snapshot of the active record is appended after every item, so a section
//! that keeps accumulating body text appears once per extension; the index
//! upserts by objectID, so the last snapshot wins and re-runs converge.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::outline::{
    is_section_heading, HeadingLevel, OutlineItem, BODY_LEVEL, TOP_SECTION_LEVEL,
};

/// Static per-page context shared by all records of one document.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub page_url: String,
    pub section: String,
    pub ranking: i64,
}

/// One addressable section of a page, as stored in the search index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    /// Upsert key; always equal to `item_url`.
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub page_url: String,
    pub item_url: String,
    pub level: HeadingLevel,
    pub title: String,
    pub section: String,
    pub ranking: i64,
    /// Ancestor heading titles, outermost first.
    pub tags: Vec<String>,
    /// Body text accumulated up to the next heading boundary.
    pub content: String,
}

/// Non-fatal validation counters for one indexing run.
///
/// Threaded by value through the run rather than held as ambient state, so
/// the builder stays testable in isolation.
#[derive(Debug, Default)]
pub struct RunStats {
    seen_ids: HashSet<String>,
    pub duplicate_ids: usize,
    pub missing_anchors: usize,
    pub untagged_sections: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn observe_id(&mut self, object_id: &str) {
        if !self.seen_ids.insert(object_id.to_string()) {
            self.duplicate_ids += 1;
            warn!(object_id, "objectID already used by another record in this run");
        }
    }
}

/// Explicit fold state: the active record plus every emitted snapshot.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    active: Option<SearchRecord>,
    emitted: Vec<SearchRecord>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one outline item into the state, then snapshots the active
    /// record into the emitted list.
    pub fn push(&mut self, ctx: &PageContext, item: &OutlineItem, stats: &mut RunStats) {
        match self.active.take() {
            None => {
                self.active = Some(open_record(ctx, item, Vec::new(), stats));
            }
            // Same section, more body text.
            Some(mut active) if item.level == BODY_LEVEL => {
                if !active.content.is_empty() {
                    active.content.push(' ');
                }
                active.content.push_str(&item.text);
                self.active = Some(active);
            }
            // Deeper section: the closed record's title becomes a breadcrumb.
            Some(active) if item.level < active.level => {
                let mut tags = active.tags;
                tags.push(active.title);
                self.active = Some(open_record(ctx, item, tags, stats));
            }
            // Sibling or ancestor: drop one breadcrumb per level climbed,
            // clamped at empty.
            Some(active) => {
                let diff = (item.level - active.level) as usize;
                let mut tags = active.tags;
                let keep = tags.len().saturating_sub(diff);
                tags.truncate(keep);
                self.active = Some(open_record(ctx, item, tags, stats));
            }
        }
        if let Some(active) = &self.active {
            self.emitted.push(active.clone());
        }
    }

    /// Consumes the builder, returning every emitted snapshot in order.
    pub fn finish(self) -> Vec<SearchRecord> {
        self.emitted
    }
}

/// Folds a whole item sequence for one page.
pub fn build_records(
    ctx: &PageContext,
    items: impl IntoIterator<Item = OutlineItem>,
    stats: &mut RunStats,
) -> Vec<SearchRecord> {
    let mut builder = RecordBuilder::new();
    for item in items {
        builder.push(ctx, &item, stats);
    }
    builder.finish()
}

fn open_record(
    ctx: &PageContext,
    item: &OutlineItem,
    tags: Vec<String>,
    stats: &mut RunStats,
) -> SearchRecord {
    let item_url = resolve_item_url(&ctx.page_url, item);
    stats.observe_id(&item_url);
    if item.anchor.is_none() && is_section_heading(item.level) {
        stats.missing_anchors += 1;
    }
    if tags.is_empty() && item.level > BODY_LEVEL && item.level < TOP_SECTION_LEVEL {
        stats.untagged_sections += 1;
        warn!(
            title = %item.text,
            level = item.level,
            "mid-level section record opened with no breadcrumb tags"
        );
    }
    SearchRecord {
        object_id: item_url.clone(),
        page_url: ctx.page_url.clone(),
        item_url,
        level: item.level,
        title: item.text.clone(),
        section: ctx.section.clone(),
        ranking: ctx.ranking,
        tags,
        content: String::new(),
    }
}

/// Section headings with an anchor address `page#anchor`; everything else
/// falls back to the page URL.
fn resolve_item_url(page_url: &str, item: &OutlineItem) -> String {
    match &item.anchor {
        Some(anchor) if is_section_heading(item.level) => {
            format!("{page_url}#{anchor}")
        }
        _ => page_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PageContext {
        PageContext {
            page_url: "https://docs.example.com/guide/".to_string(),
            section: "docs".to_string(),
            ranking: 80,
        }
    }

    fn heading(level: HeadingLevel, anchor: &str, text: &str) -> OutlineItem {
        OutlineItem::new(level, Some(anchor), "h2", text)
    }

    fn body(text: &str) -> OutlineItem {
        OutlineItem::new(BODY_LEVEL, None, "p", text)
    }

    #[test]
    fn section_heading_url_carries_the_anchor_fragment() {
        let item = heading(5, "intro", "Intro");
        assert_eq!(
            resolve_item_url("https://d/p/", &item),
            "https://d/p/#intro"
        );
    }

    #[test]
    fn page_title_ignores_its_anchor() {
        let item = OutlineItem::new(6, Some("top"), "h1", "Guide");
        assert_eq!(resolve_item_url("https://d/p/", &item), "https://d/p/");
    }

    #[test]
    fn body_items_extend_content_space_joined() {
        let mut stats = RunStats::new();
        let records = build_records(
            &ctx(),
            vec![heading(5, "a", "A"), body("one"), body("two")],
            &mut stats,
        );
        assert_eq!(records.last().unwrap().content, "one two");
    }

    #[test]
    fn duplicate_object_ids_are_counted_not_fatal() {
        let mut stats = RunStats::new();
        let items = vec![heading(5, "same", "First"), heading(5, "same", "Second")];
        let records = build_records(&ctx(), items, &mut stats);
        assert_eq!(stats.duplicate_ids, 1);
        // Both records still exist; the index keeps whichever lands last.
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn untagged_midlevel_sections_are_counted() {
        let mut stats = RunStats::new();
        // An h4 with no preceding ancestors opens with empty tags.
        build_records(
            &ctx(),
            vec![OutlineItem::new(3, Some("stray"), "h4", "Stray")],
            &mut stats,
        );
        assert_eq!(stats.untagged_sections, 1);
    }
}

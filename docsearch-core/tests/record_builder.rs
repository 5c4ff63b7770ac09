use std::collections::HashMap;

use docsearch_core::outline::{OutlineItem, BODY_LEVEL};
use docsearch_core::record::{build_records, PageContext, RunStats, SearchRecord};

const PAGE: &str = "https://docs.example.com/guide/";

fn ctx() -> PageContext {
    PageContext {
        page_url: PAGE.to_string(),
        section: "docs".to_string(),
        ranking: 80,
    }
}

fn h2(anchor: &str, text: &str) -> OutlineItem {
    OutlineItem::new(5, Some(anchor), "h2", text)
}

fn h3(anchor: &str, text: &str) -> OutlineItem {
    OutlineItem::new(4, Some(anchor), "h3", text)
}

fn h4(anchor: &str, text: &str) -> OutlineItem {
    OutlineItem::new(3, Some(anchor), "h4", text)
}

fn p(text: &str) -> OutlineItem {
    OutlineItem::new(BODY_LEVEL, None, "p", text)
}

/// Last snapshot per objectID, i.e. the state the index converges to after
/// upserting every emitted record in order.
fn final_by_id(records: &[SearchRecord]) -> HashMap<String, SearchRecord> {
    let mut map = HashMap::new();
    for record in records {
        map.insert(record.object_id.clone(), record.clone());
    }
    map
}

#[test]
fn every_item_emits_exactly_one_snapshot() {
    let mut stats = RunStats::new();
    let items = vec![h2("a", "A"), p("one"), h3("b", "B"), p("two"), p("three")];
    let records = build_records(&ctx(), items, &mut stats);
    assert_eq!(records.len(), 5);
}

#[test]
fn round_trip_two_sections_with_bodies() {
    let mut stats = RunStats::new();
    let items = vec![h2("a", "A"), p("body1"), h3("b", "B"), p("body2")];
    let records = build_records(&ctx(), items, &mut stats);

    let finals = final_by_id(&records);
    assert_eq!(finals.len(), 2);

    let a = &finals[&format!("{PAGE}#a")];
    assert_eq!(a.title, "A");
    assert!(a.tags.is_empty());
    assert_eq!(a.content, "body1");

    let b = &finals[&format!("{PAGE}#b")];
    assert_eq!(b.title, "B");
    assert_eq!(b.tags, vec!["A"]);
    assert_eq!(b.content, "body2");
}

#[test]
fn sibling_headings_keep_tags_and_emit_each_record_once() {
    let mut stats = RunStats::new();
    let items = vec![h2("x", "Intro"), h2("y", "Next")];
    let records = build_records(&ctx(), items, &mut stats);

    // Level stays equal, so the sibling branch runs with levelDiff = 0.
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Intro");
    assert_eq!(records[1].title, "Next");
    assert!(records[1].tags.is_empty());
    assert_eq!(stats.duplicate_ids, 0);

    let intro_snapshots = records
        .iter()
        .filter(|r| r.object_id == format!("{PAGE}#x"))
        .count();
    assert_eq!(intro_snapshots, 1);
}

#[test]
fn descending_headings_accumulate_breadcrumbs() {
    let mut stats = RunStats::new();
    let items = vec![h2("a", "A"), h3("b", "B"), h4("c", "C")];
    let records = build_records(&ctx(), items, &mut stats);
    let finals = final_by_id(&records);

    assert!(finals[&format!("{PAGE}#a")].tags.is_empty());
    assert_eq!(finals[&format!("{PAGE}#b")].tags, vec!["A"]);
    assert_eq!(finals[&format!("{PAGE}#c")].tags, vec!["A", "B"]);
}

#[test]
fn climbing_back_up_truncates_by_level_difference() {
    let mut stats = RunStats::new();
    let items = vec![h2("a", "A"), h3("b", "B"), h4("c", "C"), h2("d", "D")];
    let records = build_records(&ctx(), items, &mut stats);
    let finals = final_by_id(&records);

    // From level 3 (h4, tags [A, B]) back to level 5: diff 2, drop both.
    assert!(finals[&format!("{PAGE}#d")].tags.is_empty());
}

#[test]
fn truncating_more_levels_than_tags_clamps_to_empty() {
    let mut stats = RunStats::new();
    // Active record is the h3 with a single breadcrumb; the h1 climbs two
    // levels, more than the one tag held.
    let items = vec![
        h2("a", "A"),
        h3("b", "B"),
        OutlineItem::new(6, Some("top"), "h1", "Title"),
    ];
    let records = build_records(&ctx(), items, &mut stats);
    let finals = final_by_id(&records);

    assert!(finals[PAGE].tags.is_empty());
}

#[test]
fn body_items_never_open_records() {
    let mut stats = RunStats::new();
    let items = vec![
        h2("a", "A"),
        p("one"),
        p("two"),
        h3("b", "B"),
        p("three"),
    ];
    let records = build_records(&ctx(), items.clone(), &mut stats);

    let heading_items = items.iter().filter(|i| (2..=5).contains(&i.level)).count();
    let distinct_section_records = final_by_id(&records)
        .values()
        .filter(|r| r.level > 1)
        .count();
    assert!(distinct_section_records <= heading_items);
    assert_eq!(distinct_section_records, 2);
}

#[test]
fn leading_body_text_opens_a_page_level_record() {
    let mut stats = RunStats::new();
    let items = vec![p("Standalone intro."), p("More intro.")];
    let records = build_records(&ctx(), items, &mut stats);

    let finals = final_by_id(&records);
    assert_eq!(finals.len(), 1);
    let record = &finals[PAGE];
    assert_eq!(record.level, 1);
    assert_eq!(record.title, "Standalone intro.");
    assert_eq!(record.content, "More intro.");
}

#[test]
fn anchorless_section_heading_falls_back_to_the_page_url() {
    let mut stats = RunStats::new();
    let items = vec![OutlineItem::new(4, None, "h3", "No anchor")];
    let records = build_records(&ctx(), items, &mut stats);

    assert_eq!(records[0].object_id, PAGE);
    assert_eq!(records[0].item_url, PAGE);
    assert_eq!(stats.missing_anchors, 1);
}

#[test]
fn rebuilding_unchanged_input_converges_to_identical_records() {
    let items = vec![h2("a", "A"), p("body"), h3("b", "B"), p("more")];

    let mut first_stats = RunStats::new();
    let first = final_by_id(&build_records(&ctx(), items.clone(), &mut first_stats));
    let mut second_stats = RunStats::new();
    let second = final_by_id(&build_records(&ctx(), items, &mut second_stats));

    assert_eq!(first, second);
}

#[test]
fn record_serialises_with_literal_object_id_key() {
    let mut stats = RunStats::new();
    let records = build_records(&ctx(), vec![h2("a", "A")], &mut stats);
    let json = serde_json::to_value(&records[0]).unwrap();

    assert_eq!(json["objectID"], format!("{PAGE}#a"));
    assert_eq!(json["pageUrl"], PAGE);
    assert_eq!(json["itemUrl"], format!("{PAGE}#a"));
    assert_eq!(json["level"], 5);
    assert_eq!(json["section"], "docs");
    assert_eq!(json["ranking"], 80);
}

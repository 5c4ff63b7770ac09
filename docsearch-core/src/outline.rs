//! Outline extraction: walks a container subtree in document pre-order and
//! yields one [`OutlineItem`] per node whose tag maps to a heading level.
//!
//! Levels run from 1 (body text: `p`, `li`) to 6 (`h1`); a higher level is
//! more structurally significant. Unmapped tags are transparent: they emit
//! nothing but their children are still visited. Elements carrying an
//! excluded marker class are skipped entirely, both as items and inside
//! flattened text.

use ego_tree::NodeRef;
use scraper::{node::Node, ElementRef};
use tracing::warn;

/// Structural significance of an outline node, 1 (body) to 6 (`h1`).
pub type HeadingLevel = u8;

/// Level assigned to body content (`p`, `li`).
pub const BODY_LEVEL: HeadingLevel = 1;

/// Level of a top-of-page section heading (`h2`).
pub const TOP_SECTION_LEVEL: HeadingLevel = 5;

/// Closed tag → level mapping. Anything else is not a section boundary.
///
/// `h6` has no slot on the 6-point scale and passes through like any
/// unmapped tag.
pub fn heading_level(tag: &str) -> Option<HeadingLevel> {
    match tag {
        "h1" => Some(6),
        "h2" => Some(5),
        "h3" => Some(4),
        "h4" => Some(3),
        "h5" => Some(2),
        "p" | "li" => Some(BODY_LEVEL),
        _ => None,
    }
}

/// True for heading levels that address a sub-section of the page, i.e.
/// strictly between body text and the page title. Only these carry an
/// anchor fragment in their record URL.
pub fn is_section_heading(level: HeadingLevel) -> bool {
    level > BODY_LEVEL && level < 6
}

/// One node of the extracted outline, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    pub level: HeadingLevel,
    /// The node's `id` attribute, when present.
    pub anchor: Option<String>,
    /// Tag name the item was extracted from.
    pub tag: String,
    /// Flattened text content, internal whitespace collapsed to spaces.
    pub text: String,
}

impl OutlineItem {
    pub fn new(
        level: HeadingLevel,
        anchor: Option<&str>,
        tag: &str,
        text: &str,
    ) -> Self {
        Self {
            level,
            anchor: anchor.map(str::to_owned),
            tag: tag.to_string(),
            text: text.to_string(),
        }
    }
}

/// Lazy pre-order iterator over the outline of one container subtree.
///
/// Restartable by constructing a fresh iterator from the same root; no node
/// is mutated.
pub struct OutlineItems<'a> {
    stack: Vec<NodeRef<'a, Node>>,
    exclude: &'a [String],
}

impl<'a> OutlineItems<'a> {
    pub fn new(root: ElementRef<'a>, exclude: &'a [String]) -> Self {
        Self {
            stack: vec![*root],
            exclude,
        }
    }
}

impl<'a> Iterator for OutlineItems<'a> {
    type Item = OutlineItem;

    fn next(&mut self) -> Option<OutlineItem> {
        while let Some(node) = self.stack.pop() {
            let Some(element) = ElementRef::wrap(node) else {
                // Text and comment nodes carry no outline structure.
                continue;
            };
            if is_excluded(element.value(), self.exclude) {
                continue;
            }
            let tag = element.value().name();
            if let Some(level) = heading_level(tag) {
                let text = flatten_text(&element, self.exclude);
                let anchor = element.value().attr("id");
                if anchor.is_none() && is_section_heading(level) {
                    warn!(
                        tag,
                        text = %text,
                        "heading has no anchor id; its record will fall back to the page url"
                    );
                }
                // The node's text is already flattened into the item, so its
                // descendants are not visited again.
                return Some(OutlineItem::new(level, anchor, tag, &text));
            }
            // Children are pushed in reverse so the stack pops them in
            // document order.
            let children: Vec<_> = node.children().collect();
            for child in children.into_iter().rev() {
                self.stack.push(child);
            }
        }
        None
    }
}

fn is_excluded(element: &scraper::node::Element, exclude: &[String]) -> bool {
    element
        .classes()
        .any(|class| exclude.iter().any(|skip| skip == class))
}

fn flatten_text(element: &ElementRef<'_>, exclude: &[String]) -> String {
    let mut buf = String::new();
    collect_text(element, exclude, &mut buf);
    normalize_whitespace(&buf)
}

fn collect_text(node: &NodeRef<'_, Node>, exclude: &[String], out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            if is_excluded(element, exclude) {
                return;
            }
            for child in node.children() {
                collect_text(&child, exclude, out);
            }
        }
        _ => {}
    }
}

/// Collapses newlines, tabs and runs of spaces to single spaces and trims.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_mapping_is_closed() {
        assert_eq!(heading_level("h1"), Some(6));
        assert_eq!(heading_level("h2"), Some(5));
        assert_eq!(heading_level("h5"), Some(2));
        assert_eq!(heading_level("p"), Some(1));
        assert_eq!(heading_level("li"), Some(1));
        assert_eq!(heading_level("h6"), None);
        assert_eq!(heading_level("div"), None);
        assert_eq!(heading_level("td"), None);
    }

    #[test]
    fn section_headings_are_strictly_between_body_and_page_title() {
        assert!(!is_section_heading(1));
        assert!(is_section_heading(2));
        assert!(is_section_heading(5));
        assert!(!is_section_heading(6));
    }

    #[test]
    fn whitespace_collapses_to_single_spaces() {
        assert_eq!(normalize_whitespace("a\n\tb   c\n"), "a b c");
        assert_eq!(normalize_whitespace("   "), "");
    }
}

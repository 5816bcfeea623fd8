//! Anchored strategy: locate a section by marker text, then take the nearest
//! following anchor.
//!
//! The document is flattened into its pre-order node sequence. For a marker
//! element at position `i`, the scan covers positions `i + 1..` to the end of
//! the document, so the element's own descendants come first. Anchors before
//! the marker are never considered.

use super::href_matches;
use ego_tree::iter::Edge;
use ego_tree::NodeId;
use scraper::{Html, Selector};
use std::collections::HashMap;

/// Elements whose text may carry a marker phrase.
const SECTION_TAGS: &str = "h1, h2, h3, h4, h5, h6, div, p";

/// Returns the raw href of the first matching anchor following the first
/// section (in document order) that contains `marker` and has one.
pub fn find_anchored(document: &Html, marker: &str, extensions: &[String]) -> Option<String> {
    let sections = Selector::parse(SECTION_TAGS).ok()?;
    let order = document_order(document);
    let position: HashMap<NodeId, usize> =
        order.iter().enumerate().map(|(i, id)| (*id, i)).collect();

    for section in document.select(&sections) {
        let text: String = section.text().collect();
        if !text.trim().contains(marker) {
            continue;
        }
        let Some(&start) = position.get(&section.id()) else {
            continue;
        };
        if let Some(href) = scan_forward(document, &order[start + 1..], extensions) {
            return Some(href);
        }
    }
    None
}

/// Node ids in the order the parser emits them (pre-order).
fn document_order(document: &Html) -> Vec<NodeId> {
    document
        .tree
        .root()
        .traverse()
        .filter_map(|edge| match edge {
            Edge::Open(node) => Some(node.id()),
            Edge::Close(_) => None,
        })
        .collect()
}

/// First `<a>` in `ids` whose href matches.
fn scan_forward(document: &Html, ids: &[NodeId], extensions: &[String]) -> Option<String> {
    ids.iter()
        .filter_map(|id| document.tree.get(*id))
        .filter_map(|node| node.value().as_element())
        .filter(|el| el.name() == "a")
        .filter_map(|el| el.attr("href"))
        .find(|href| href_matches(href, extensions))
        .map(str::to_string)
}

//! Direct strategy: first matching anchor in document order.

use super::href_matches;
use scraper::{Html, Selector};

/// Returns the raw href of the first `<a>` whose href contains any of
/// `extensions` (case-insensitive).
pub fn find_direct(document: &Html, extensions: &[String]) -> Option<String> {
    let anchors = Selector::parse("a[href]").ok()?;
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href_matches(href, extensions))
        .map(str::to_string)
}

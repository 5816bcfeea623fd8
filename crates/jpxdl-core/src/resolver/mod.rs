//! Link resolver: turn a listing page into the absolute URL of one data file.
//!
//! Two selection strategies exist. `Direct` takes the first anchor whose href
//! names a wanted extension; `Anchored` first locates a section by a marker
//! phrase and then walks forward in document order to the nearest such anchor.

mod anchored;
mod direct;
mod origin;

pub use anchored::find_anchored;
pub use direct::find_direct;
pub use origin::{absolutize, origin_of};

use crate::error::FeedError;
use crate::http::HttpGet;
use scraper::Html;
use serde::{Deserialize, Serialize};

/// How to pick the target link on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Strategy {
    /// First `<a>` whose href contains one of `extensions`.
    Direct { extensions: Vec<String> },
    /// First `<a>` matching `extensions` after a heading/div/p whose text
    /// contains `marker`.
    Anchored {
        marker: String,
        extensions: Vec<String>,
    },
}

impl Strategy {
    pub fn extensions(&self) -> &[String] {
        match self {
            Strategy::Direct { extensions } => extensions,
            Strategy::Anchored { extensions, .. } => extensions,
        }
    }
}

/// Case-insensitive substring test of `href` against every extension.
pub(crate) fn href_matches(href: &str, extensions: &[String]) -> bool {
    let href = href.to_lowercase();
    extensions
        .iter()
        .any(|ext| href.contains(&ext.to_lowercase()))
}

/// Scan already-fetched `html` and return the absolute URL picked by
/// `strategy`, or `None` when nothing matches.
pub fn find_link(html: &str, origin: &str, strategy: &Strategy) -> Option<String> {
    let document = Html::parse_document(html);
    let href = match strategy {
        Strategy::Direct { extensions } => find_direct(&document, extensions),
        Strategy::Anchored { marker, extensions } => {
            find_anchored(&document, marker, extensions)
        }
    }?;
    Some(absolutize(origin, &href))
}

/// Fetch `page_url` and resolve the target link on it.
pub fn resolve<C>(
    client: &C,
    page_url: &str,
    origin: &str,
    strategy: &Strategy,
) -> Result<String, FeedError>
where
    C: HttpGet + ?Sized,
{
    let html = client
        .get_text(page_url)
        .map_err(|e| FeedError::transport(page_url, e))?;
    match find_link(&html, origin, strategy) {
        Some(url) => {
            tracing::info!(page = page_url, "found link: {}", url);
            Ok(url)
        }
        None => Err(FeedError::NotFound {
            page: page_url.to_string(),
        }),
    }
}

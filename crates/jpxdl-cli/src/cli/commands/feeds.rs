//! `jpxdl feeds` – list configured feeds.

use jpxdl_core::config::{FeedConfig, JpxConfig};
use jpxdl_core::filename::ExtensionRule;
use jpxdl_core::resolver::Strategy;

pub fn run_list_feeds(cfg: &JpxConfig) {
    if cfg.feeds.is_empty() {
        println!("No feeds configured.");
        return;
    }
    for feed in &cfg.feeds {
        println!("{}", describe(feed));
    }
}

/// One line per feed: name, selection, output pattern, page.
pub(crate) fn describe(feed: &FeedConfig) -> String {
    let selection = match &feed.strategy {
        Strategy::Direct { extensions } => format!("first {}", extensions.join("|")),
        Strategy::Anchored { marker, extensions } => {
            format!("{} after \"{}\"", extensions.join("|"), marker)
        }
    };
    let ext = match &feed.extension {
        ExtensionRule::Fixed { ext } => ext.clone(),
        ExtensionRule::FromUrl {
            then, otherwise, ..
        } => format!("{{{}|{}}}", then, otherwise),
    };
    format!(
        "{:<22} {:<40} {}/{}_YYYYMMDD.{}  <- {}",
        feed.name,
        selection,
        feed.directory.display(),
        feed.prefix,
        ext,
        feed.page_url
    )
}

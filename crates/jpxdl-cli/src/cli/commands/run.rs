//! `jpxdl run` – resolve and download feeds, one after another.

use anyhow::Result;
use jpxdl_core::config::{FeedConfig, JpxConfig};
use jpxdl_core::feed::{self, Feed, FeedReport, FeedSummary};
use jpxdl_core::http::CurlClient;
use std::path::Path;

/// Runs the selected feeds. Individual feed failures are reported, not
/// returned: the command succeeds once every feed has been attempted.
pub fn run_feeds(
    cfg: &JpxConfig,
    names: &[String],
    output_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let root = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cfg.output_root());

    let (selected, unknown) = select_feeds(cfg, names);
    for name in &unknown {
        tracing::warn!("unknown feed {:?} skipped", name);
        eprintln!("unknown feed: {}", name);
    }

    let feeds = build_feeds(&selected, &root)?;

    tracing::info!("starting run of {} feed(s) into {}", feeds.len(), root.display());
    let client = CurlClient::from_config(&cfg.http);
    let reports = feed::run_feeds(&client, &feeds, feed::today());

    if json {
        let summaries: Vec<FeedSummary<'_>> = reports.iter().map(FeedReport::summary).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for report in &reports {
            println!("{}", summary_line(report));
        }
    }
    Ok(())
}

/// Feeds to run in config order, plus requested names that match nothing.
/// No names selects every feed.
pub(crate) fn select_feeds<'a>(
    cfg: &'a JpxConfig,
    names: &[String],
) -> (Vec<&'a FeedConfig>, Vec<String>) {
    if names.is_empty() {
        return (cfg.feeds.iter().collect(), Vec::new());
    }
    let selected = cfg
        .feeds
        .iter()
        .filter(|f| names.iter().any(|n| n == &f.name))
        .collect();
    let unknown = names
        .iter()
        .filter(|n| cfg.feed(n).is_none())
        .cloned()
        .collect();
    (selected, unknown)
}

/// Every selected feed, or the first config error. A feed that cannot be
/// built is never silently left out of the run.
pub(crate) fn build_feeds(selected: &[&FeedConfig], root: &Path) -> Result<Vec<Feed>> {
    let feeds = selected
        .iter()
        .map(|c| Feed::from_config(c, root))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(feeds)
}

pub(crate) fn summary_line(report: &FeedReport) -> String {
    match &report.result {
        Ok(file) => format!(
            "{:<22} saved    {} ({} bytes)",
            report.feed,
            file.path.display(),
            file.bytes
        ),
        Err(e) => format!("{:<22} skipped  {}", report.feed, e),
    }
}

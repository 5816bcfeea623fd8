//! Feed orchestration: resolve, then fetch, once per feed, in order.
//!
//! A failing feed is logged and reported; it never stops the feeds after it.

use crate::config::{ConfigError, FeedConfig};
use crate::error::FeedError;
use crate::fetcher::{self, DownloadedFile, Target};
use crate::filename::ExtensionRule;
use crate::http::HttpGet;
use crate::resolver::{self, Strategy};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A feed with its origin resolved and its directory placed under the output root.
#[derive(Debug, Clone)]
pub struct Feed {
    pub name: String,
    pub page_url: String,
    pub origin: String,
    pub strategy: Strategy,
    pub directory: PathBuf,
    pub prefix: String,
    pub extension: ExtensionRule,
}

impl Feed {
    pub fn from_config(cfg: &FeedConfig, output_root: &Path) -> Result<Self, ConfigError> {
        let origin = match &cfg.origin {
            Some(o) => o.trim_end_matches('/').to_string(),
            None => resolver::origin_of(&cfg.page_url).ok_or_else(|| ConfigError::BadOrigin {
                feed: cfg.name.clone(),
                page_url: cfg.page_url.clone(),
            })?,
        };
        Ok(Self {
            name: cfg.name.clone(),
            page_url: cfg.page_url.clone(),
            origin,
            strategy: cfg.strategy.clone(),
            directory: output_root.join(&cfg.directory),
            prefix: cfg.prefix.clone(),
            extension: cfg.extension.clone(),
        })
    }

    fn target(&self) -> Target<'_> {
        Target {
            directory: &self.directory,
            prefix: &self.prefix,
            extension: &self.extension,
        }
    }
}

/// What happened to one feed in a run.
#[derive(Debug)]
pub struct FeedReport {
    pub feed: String,
    /// Resolved file URL, if resolution succeeded.
    pub url: Option<String>,
    pub result: Result<DownloadedFile, FeedError>,
}

/// Serializable view of a [`FeedReport`].
#[derive(Debug, Serialize)]
pub struct FeedSummary<'a> {
    pub feed: &'a str,
    pub url: Option<&'a str>,
    pub saved: Option<&'a DownloadedFile>,
    pub error_kind: Option<&'static str>,
    pub error: Option<String>,
}

impl FeedReport {
    pub fn is_saved(&self) -> bool {
        self.result.is_ok()
    }

    pub fn summary(&self) -> FeedSummary<'_> {
        let (saved, error_kind, error) = match &self.result {
            Ok(file) => (Some(file), None, None),
            Err(e) => (None, Some(e.kind()), Some(e.to_string())),
        };
        FeedSummary {
            feed: &self.feed,
            url: self.url.as_deref(),
            saved,
            error_kind,
            error,
        }
    }
}

/// Local calendar date used for output filenames.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve and download one feed.
pub fn run_feed<C>(client: &C, feed: &Feed, today: NaiveDate) -> FeedReport
where
    C: HttpGet + ?Sized,
{
    tracing::info!(feed = %feed.name, "resolving link on {}", feed.page_url);
    let result = resolver::resolve(client, &feed.page_url, &feed.origin, &feed.strategy);
    let url = result.as_ref().ok().cloned();
    let result = result.and_then(|url| {
        fetcher::fetch_to_file(client, Some(url.as_str()), &feed.target(), today)
    });

    if let Err(e) = &result {
        tracing::error!(feed = %feed.name, kind = e.kind(), "feed skipped: {}", e);
    }
    FeedReport {
        feed: feed.name.clone(),
        url,
        result,
    }
}

/// Run every feed in order. Always returns one report per feed.
pub fn run_feeds<C>(client: &C, feeds: &[Feed], today: NaiveDate) -> Vec<FeedReport>
where
    C: HttpGet + ?Sized,
{
    let reports: Vec<FeedReport> = feeds
        .iter()
        .map(|feed| run_feed(client, feed, today))
        .collect();
    let saved = reports.iter().filter(|r| r.is_saved()).count();
    tracing::info!("processed {} feed(s), {} saved", reports.len(), saved);
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_feeds;
    use crate::http::mock::MockClient;
    use std::fs;

    fn feed(root: &Path, name: &str) -> Feed {
        let mut cfg = default_feeds()
            .into_iter()
            .find(|f| f.name == name)
            .unwrap();
        cfg.page_url = "https://example.test/index.html".to_string();
        Feed::from_config(&cfg, root).unwrap()
    }

    #[test]
    fn from_config_derives_origin_and_directory() {
        let root = Path::new("/out");
        let f = Feed::from_config(&default_feeds()[0], root).unwrap();
        assert_eq!(f.origin, "https://www.jpx.co.jp");
        assert_eq!(f.directory, PathBuf::from("/out/jpx_data"));
    }

    #[test]
    fn from_config_explicit_origin_wins() {
        let mut cfg = default_feeds()[0].clone();
        cfg.origin = Some("https://mirror.example.test/".to_string());
        let f = Feed::from_config(&cfg, Path::new(".")).unwrap();
        assert_eq!(f.origin, "https://mirror.example.test");
    }

    #[test]
    fn from_config_bad_page_url() {
        let mut cfg = default_feeds()[0].clone();
        cfg.page_url = "not a url".to_string();
        assert!(matches!(
            Feed::from_config(&cfg, Path::new(".")),
            Err(ConfigError::BadOrigin { .. })
        ));
    }

    #[test]
    fn end_to_end_settlement_prices() {
        let dir = tempfile::tempdir().unwrap();
        let f = feed(dir.path(), "settlement-prices");
        let client = MockClient::new()
            .with_body(
                "https://example.test/index.html",
                br#"<a href="/files/data.csv">Daily</a>"#,
            )
            .with_body("https://example.test/files/data.csv", b"a,b,c");
        let day = today();

        let report = run_feed(&client, &f, day);
        assert_eq!(
            report.url.as_deref(),
            Some("https://example.test/files/data.csv")
        );
        let saved = report.result.as_ref().unwrap();
        let expected = dir
            .path()
            .join("jpx_data")
            .join(format!("jpx_settlement_prices_{}.csv", day.format("%Y%m%d")));
        assert_eq!(saved.path, expected);
        assert_eq!(fs::read(&expected).unwrap(), b"a,b,c");
    }

    #[test]
    fn not_found_skips_download() {
        let dir = tempfile::tempdir().unwrap();
        let f = feed(dir.path(), "settlement-prices");
        let client = MockClient::new().with_body("https://example.test/index.html", b"<p>empty</p>");

        let report = run_feed(&client, &f, today());
        assert!(report.url.is_none());
        assert!(matches!(report.result, Err(FeedError::NotFound { .. })));
        assert_eq!(client.calls().len(), 1);
        assert!(!dir.path().join("jpx_data").exists());
    }

    #[test]
    fn failing_feed_does_not_stop_the_next() {
        let dir = tempfile::tempdir().unwrap();
        let mut broken = feed(dir.path(), "settlement-prices");
        broken.page_url = "https://down.example.test/".to_string();
        let rates = feed(dir.path(), "irs-settlement-rates");
        let client = MockClient::new()
            .with_status("https://down.example.test/", 503)
            .with_body(
                "https://example.test/index.html",
                br#"<h3>Settlement Rates for Interest Rate Swap(Daily)</h3>
                    <a href="rates/daily.pdf">PDF</a>"#,
            )
            .with_body("https://example.test/rates/daily.pdf", b"%PDF-1.4");
        let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let reports = run_feeds(&client, &[broken, rates], day);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].summary().error_kind, Some("transport"));
        assert!(reports[1].is_saved());
        assert_eq!(
            reports[1].result.as_ref().unwrap().path,
            dir.path().join("irs_data").join("irs_settlement_rates_20240131.pdf")
        );
    }

    #[test]
    fn summary_serializes() {
        let report = FeedReport {
            feed: "settlement-prices".to_string(),
            url: None,
            result: Err(FeedError::NotFound {
                page: "https://example.test/".to_string(),
            }),
        };
        let json = serde_json::to_value(report.summary()).unwrap();
        assert_eq!(json["feed"], "settlement-prices");
        assert_eq!(json["error_kind"], "not-found");
        assert!(json["saved"].is_null());
    }
}

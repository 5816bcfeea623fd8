//! `jpxdl resolve <name>` – print the file URL a feed would download.

use anyhow::{Context, Result};
use jpxdl_core::config::JpxConfig;
use jpxdl_core::feed::Feed;
use jpxdl_core::http::CurlClient;
use jpxdl_core::resolver;

pub fn run_resolve(cfg: &JpxConfig, name: &str) -> Result<()> {
    let feed_cfg = cfg
        .feed(name)
        .with_context(|| format!("unknown feed: {}", name))?;
    let feed = Feed::from_config(feed_cfg, &cfg.output_root())?;
    let client = CurlClient::from_config(&cfg.http);
    let url = resolver::resolve(&client, &feed.page_url, &feed.origin, &feed.strategy)?;
    println!("{url}");
    Ok(())
}

//! File fetcher: one GET, whole payload written to a dated path.
//!
//! The target file is created with truncation, so a second run on the same
//! day replaces the first file instead of adding another.

use crate::checksum;
use crate::error::FeedError;
use crate::filename::{dated_filename, ExtensionRule};
use crate::http::HttpGet;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where and under what name a feed's file is saved.
#[derive(Debug, Clone)]
pub struct Target<'a> {
    pub directory: &'a Path,
    pub prefix: &'a str,
    pub extension: &'a ExtensionRule,
}

impl Target<'_> {
    /// Full output path for a file fetched from `url` on `today`.
    pub fn path_for(&self, url: &str, today: NaiveDate) -> PathBuf {
        let ext = self.extension.pick(url);
        self.directory
            .join(dated_filename(self.prefix, today, ext))
    }
}

/// A file that was fetched and written.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

/// Fetch `url` and write it under `target`. `None` fails with
/// [`FeedError::MissingUrl`] before any I/O.
pub fn fetch_to_file<C>(
    client: &C,
    url: Option<&str>,
    target: &Target<'_>,
    today: NaiveDate,
) -> Result<DownloadedFile, FeedError>
where
    C: HttpGet + ?Sized,
{
    let url = url.ok_or(FeedError::MissingUrl)?;

    fs::create_dir_all(target.directory)
        .map_err(|e| FeedError::filesystem(target.directory, e))?;
    let path = target.path_for(url, today);

    tracing::info!("downloading {} -> {}", url, path.display());
    let body = client
        .get(url)
        .map_err(|e| FeedError::transport(url, e))?;

    write_replacing(&path, &body).map_err(|e| FeedError::filesystem(&path, e))?;

    let file = DownloadedFile {
        bytes: body.len() as u64,
        sha256: checksum::sha256_bytes(&body),
        path,
    };
    tracing::info!(
        bytes = file.bytes,
        sha256 = %file.sha256,
        "saved {}",
        file.path.display()
    );
    Ok(file)
}

fn write_replacing(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

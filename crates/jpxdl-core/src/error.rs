//! Typed outcomes for a feed run.
//!
//! Every failure mode of resolve-then-fetch is a variant here so the
//! orchestrator can log it and move on to the next feed.

use std::io;
use std::path::PathBuf;

/// Error returned by a single HTTP GET (curl failure or HTTP error).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, bad URL, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Outcome of a feed step that produced nothing.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Network failure or non-2xx response while fetching `url`.
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
    /// The page was fetched but holds no matching link. Not a defect.
    #[error("no matching link found on {page}")]
    NotFound { page: String },
    /// The fetcher was handed no URL to download.
    #[error("no URL to download")]
    MissingUrl,
    /// Creating the output directory or writing the file failed.
    #[error("cannot write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FeedError {
    pub(crate) fn transport(url: &str, source: TransportError) -> Self {
        FeedError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FeedError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Short label used in run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Transport { .. } => "transport",
            FeedError::NotFound { .. } => "not-found",
            FeedError::MissingUrl => "missing-url",
            FeedError::Filesystem { .. } => "filesystem",
        }
    }
}

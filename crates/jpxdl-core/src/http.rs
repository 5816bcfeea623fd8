//! Blocking HTTP GET over libcurl.
//!
//! Resolver and fetcher only see the [`HttpGet`] trait, so tests can swap in
//! a canned client and the binary uses [`CurlClient`].

use crate::config::HttpConfig;
use crate::error::TransportError;
use std::time::Duration;

/// One unconditional GET returning the whole body.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    /// GET and decode the body as text (lossy for non-UTF-8 pages).
    fn get_text(&self, url: &str) -> Result<String, TransportError> {
        let body = self.get(url)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// libcurl-backed client. Sends the configured User-Agent on every request
/// and follows redirects.
#[derive(Debug, Clone)]
pub struct CurlClient {
    user_agent: String,
    connect_timeout: Duration,
    timeout: Duration,
    max_redirections: u32,
}

impl CurlClient {
    pub fn from_config(cfg: &HttpConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_redirections: cfg.max_redirections,
        }
    }
}

impl Default for CurlClient {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

impl HttpGet for CurlClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirections)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }
        tracing::debug!(url, bytes = body.len(), "GET ok");
        Ok(body)
    }
}

//! Fetch Proxy
//!
//! Validates a URL, performs one outbound GET and relays the body as text.
//! Upstream status codes are not interpreted; whatever body comes back is
//! handed to the caller.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::error::{KeeperError, Result};

/// Body fetched from an upstream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub url: String,
    pub content: String,
}

// == Fetch Proxy ==
#[derive(Debug, Clone)]
pub struct FetchProxy {
    client: Client,
}

impl FetchProxy {
    /// Builds the outbound client with a bounded total request timeout.
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Checks that `raw` is an absolute URL.
    ///
    /// The scheme is not checked here; a URL the client cannot fetch fails
    /// as an upstream error.
    pub fn parse_url(raw: &str) -> Result<Url> {
        if raw.is_empty() {
            return Err(KeeperError::Validation(
                "url parameter is required".to_string(),
            ));
        }

        Url::parse(raw).map_err(|_| KeeperError::Validation("invalid url format".to_string()))
    }

    // == Fetch ==
    pub async fn fetch(&self, raw: &str) -> Result<Fetched> {
        let url = Self::parse_url(raw)?;

        if !matches!(url.scheme(), "http" | "https") {
            warn!(url = %raw, scheme = url.scheme(), "Unsupported upstream scheme");
            return Err(KeeperError::Upstream(format!(
                "unsupported protocol scheme \"{}\"",
                url.scheme()
            )));
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %raw, error = %e, "Upstream fetch failed");
            KeeperError::Upstream(e.to_string())
        })?;

        let status = response.status();
        let content = response.text().await.map_err(|e| {
            warn!(url = %raw, error = %e, "Failed to read upstream body");
            KeeperError::Read
        })?;

        debug!(url = %raw, status = %status, bytes = content.len(), "Upstream fetched");
        Ok(Fetched {
            url: raw.to_string(),
            content,
        })
    }
}

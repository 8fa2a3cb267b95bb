//! HTTP manifest fetching.
//!
//! [`Fetch`] hands back the response body as a reader so the caller owns
//! it and releases it when it goes out of scope, whichever way the read
//! ends.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use std::io::Read;

/// Opens a GET request for a URL and returns its body.
pub trait Fetch {
    /// Issue the request. Non-success statuses are errors.
    fn open(&self, url: &Url) -> Result<Box<dyn Read>>;
}

/// Fetches manifests over HTTP/HTTPS.
///
/// No timeout is configured beyond the client's defaults.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("appimport/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn open(&self, url: &Url) -> Result<Box<dyn Read>> {
        let response = self.client.get(url.clone()).send()?;

        if !response.status().is_success() {
            bail!("HTTP {}", response.status());
        }

        Ok(Box::new(response))
    }
}

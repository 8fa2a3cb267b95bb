//! Blocking client for the cluster API server.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Talks JSON to the cluster API server.
///
/// Requests use the transport's default timeouts.
#[derive(Debug)]
pub struct ClusterClient {
    server: Url,
    token: Option<String>,
    client: Client,
}

/// The subset of an API `Status` body used for error messages.
#[derive(Debug, Deserialize)]
struct ApiStatus {
    message: Option<String>,
}

impl ClusterClient {
    /// Create a client for the given server URL.
    pub fn new(server: &str, token: Option<String>) -> Result<Self> {
        let server = Url::parse(server)
            .with_context(|| format!("invalid cluster server URL {:?}", server))?;
        let client = Client::builder()
            .user_agent(concat!("appimport/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            server,
            token: token.filter(|t| !t.is_empty()),
            client,
        })
    }

    /// The API server URL.
    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Absolute URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.server.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// POST a JSON body and decode the JSON response.
    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url_for(path);
        tracing::debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            bail!("{}", status_message(status, &text));
        }

        response
            .json::<R>()
            .with_context(|| format!("Failed to decode response from {}", url))
    }
}

/// Prefer the API `Status.message`, then the raw body, then the status line.
fn status_message(status: StatusCode, body: &str) -> String {
    let api_message = serde_json::from_str::<ApiStatus>(body)
        .ok()
        .and_then(|s| s.message)
        .filter(|m| !m.is_empty());

    match api_message {
        Some(message) => message,
        None if !body.trim().is_empty() => format!("HTTP {}: {}", status, body.trim()),
        None => format!("HTTP {}", status),
    }
}

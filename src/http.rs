//! Outbound HTTP adapter.
//!
//! Every upstream call in the service goes through [`send`]: one attempt, a
//! fixed per-call timeout, and failures split into timeout, non-2xx status and
//! everything else.

use once_cell::sync::Lazy;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Timeout for chat-completion calls.
pub const LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for fetching pages to scrape.
pub const SCRAPE_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest redirect chain followed when redirects are enabled.
pub const MAX_REDIRECTS: usize = 20;

// Redirect handling is a client-level setting in reqwest, so keep one client per policy.
static FOLLOWING_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
        .expect("Failed to build HTTP client")
});

static DIRECT_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build HTTP client")
});

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request timed out")]
    Timeout,

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else if let Some(status) = err.status() {
            HttpError::Status(status.as_u16())
        } else {
            HttpError::Transport(err.to_string())
        }
    }
}

#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

pub async fn send(
    method: Method,
    url: &str,
    headers: HeaderMap,
    json_body: Option<&Value>,
    timeout: Duration,
    follow_redirects: bool,
) -> Result<UpstreamResponse, HttpError> {
    let client = if follow_redirects { &*FOLLOWING_CLIENT } else { &*DIRECT_CLIENT };

    let mut request = client
        .request(method.clone(), url)
        .headers(headers)
        .timeout(timeout);
    if let Some(body) = json_body {
        request = request.json(body);
    }

    debug!("{} {}", method, url);
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        debug!("{} {} -> {}", method, url, status);
        return Err(HttpError::Status(status.as_u16()));
    }

    let body = response.bytes().await?.to_vec();
    Ok(UpstreamResponse {
        status: status.as_u16(),
        body,
    })
}

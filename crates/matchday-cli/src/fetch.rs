//! Page Fetcher: URL → raw bytes.
//!
//! No retries: the outcome of the single request is reported as-is.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum FetchError {
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("GET {url} → {status}")]
  Status { url: String, status: StatusCode },
}

/// Anything that can retrieve a page.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
  async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// Fetches over HTTP(S) with one shared [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpFetcher {
  client: Client,
}

impl HttpFetcher {
  pub fn new(settings: &Settings) -> Result<Self, FetchError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(settings.timeout_secs))
      .user_agent(settings.user_agent.as_str())
      .build()?;
    Ok(Self { client })
  }
}

impl PageFetcher for HttpFetcher {
  async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
    let resp = self.client.get(url).send().await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(FetchError::Status { url: url.to_owned(), status });
    }

    let body = resp.bytes().await?;
    tracing::info!(url, bytes = body.len(), "fetched");
    Ok(body)
  }
}

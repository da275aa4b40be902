//! Remote file retrieval.

use async_trait::async_trait;

/// Failure to retrieve an uploaded file's content.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FetchError(pub String);

/// Retrieval seam for uploaded-file content.
///
/// The dispatcher only ever sees text coming out of this trait, so tests can
/// substitute a fake without a chat platform or network in the loop.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Fetch `url` and decode the body as text. A single awaited step: no
    /// timeout, no retries, no cancellation.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher backed by a shared reqwest client.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FileFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError(format!("unexpected status {status}")));
        }
        response.text().await.map_err(|e| FetchError(e.to_string()))
    }
}

//! URL-to-file retrieval.
//!
//! The pipeline only needs one capability from the network: download a
//! URL and overwrite a local file with the body. Hosts plug in their own
//! transport by implementing `Fetcher`; `HttpFetcher` covers plain HTTP(S).

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;

/// Downloads a URL into a file, replacing any previous contents.
///
/// Each call is a suspension point of the load pipeline.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and write the body to `dest`.
    ///
    /// Parent directories of `dest` are created as needed. On error the
    /// previous file, if any, may or may not still be present.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        (**self).fetch(url, dest).await
    }
}

/// `Fetcher` backed by a `reqwest` client.
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, timeouts, user agent).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        tracing::debug!(url, dest = %dest.display(), bytes = body.len(), "fetched");
        write_file(dest, &body).await
    }
}

/// Write `bytes` to `dest`, creating parent directories.
pub async fn write_file(dest: &Path, bytes: &[u8]) -> Result<(), FetchError> {
    let io_error = |source| FetchError::Io {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(dest, bytes).await.map_err(io_error)
}

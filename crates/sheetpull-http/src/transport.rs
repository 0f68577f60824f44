//! HTTP transport

use std::future::Future;
use std::time::Duration;

use bytes::{Bytes, BytesMut};

use crate::error::TransportError;
use crate::progress::{DownloadProgress, ProgressListener};

/// Upper bound on the buffer reserved up front from `Content-Length`
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// Fetches the bytes behind a URL in a single attempt
pub trait Transport: Send + Sync {
    /// GET `url`, reporting progress as chunks arrive.
    ///
    /// Implementations should treat a zero-length body as
    /// [`TransportError::EmptyBody`].
    fn get(
        &self,
        url: &str,
        timeout: Duration,
        progress: &dyn ProgressListener,
    ) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

/// Configuration for [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// `User-Agent` header value
    pub user_agent: String,
    /// Time allowed to establish a connection. Default: 10 seconds.
    pub connect_timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("sheetpull/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// [`Transport`] backed by a `reqwest` client. Redirects are followed.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from `config`
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
        progress: &dyn ProgressListener,
    ) -> Result<Bytes, TransportError> {
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::from(e)
            }
        };

        let mut response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let total = response.content_length().unwrap_or(0);
        let mut body = BytesMut::with_capacity(total.min(MAX_PREALLOCATION) as usize);

        while let Some(chunk) = response.chunk().await.map_err(map_err)? {
            body.extend_from_slice(&chunk);
            progress.on_progress(DownloadProgress::new(body.len() as u64, total));
        }

        if body.is_empty() {
            return Err(TransportError::EmptyBody);
        }

        tracing::debug!(url, bytes = body.len(), "received response body");
        Ok(body.freeze())
    }
}

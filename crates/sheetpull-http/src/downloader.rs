//! Retrying workbook download

use std::time::Duration;

use bytes::Bytes;
use sheetpull_core::{export_url, Error, Result};

use crate::cancel::CancelToken;
use crate::error::TransportError;
use crate::progress::ProgressListener;
use crate::retry::RetryPolicy;
use crate::transport::Transport;

/// Default time limit for one attempt
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-download limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Time limit for each attempt
    pub timeout: Duration,
    /// Attempt count and spacing
    pub retry: RetryPolicy,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl DownloadSettings {
    /// Check that the settings allow at least one bounded attempt
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::validation("timeout must be greater than zero"));
        }
        if self.retry.attempts == 0 {
            return Err(Error::validation("retries must be at least 1"));
        }
        Ok(())
    }
}

/// Downloads workbook exports through a [`Transport`]
#[derive(Debug, Clone)]
pub struct Downloader<T> {
    transport: T,
}

impl<T: Transport> Downloader<T> {
    /// Create a downloader over `transport`
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Download the xlsx export of spreadsheet `identifier`.
    ///
    /// Attempts run one after another. Each is bounded by `settings.timeout`;
    /// cancellation interrupts both an attempt and a backoff pause.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a zero timeout or zero attempts
    /// - [`Error::Cancelled`] when `cancel` fires
    /// - [`Error::Download`] with the last failure once every attempt failed
    pub async fn download(
        &self,
        identifier: &str,
        settings: &DownloadSettings,
        progress: &dyn ProgressListener,
        cancel: &CancelToken,
    ) -> Result<Bytes> {
        settings.validate()?;

        let url = export_url(identifier);
        let attempts = settings.retry.attempts;
        let mut last_error: Option<TransportError> = None;

        for attempt in 1..=attempts {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            if attempt > 1 {
                if let Some(delay) = settings.retry.backoff.delay(attempt - 1) {
                    tracing::debug!(attempt, ?delay, "waiting before retry");
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(Error::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }

            tracing::debug!(attempt, attempts, url = %url, "downloading workbook");
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                outcome = tokio::time::timeout(
                    settings.timeout,
                    self.transport.get(&url, settings.timeout, progress),
                ) => outcome.unwrap_or_else(|_| Err(TransportError::Timeout(settings.timeout))),
            };

            match outcome {
                Ok(bytes) => {
                    tracing::info!(attempt, bytes = bytes.len(), "downloaded workbook");
                    return Ok(bytes);
                }
                Err(e) => {
                    tracing::warn!(attempt, attempts, error = %e, "download attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(Error::Download {
            attempts,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt was made".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;

    struct FixedTransport(Bytes);

    impl Transport for FixedTransport {
        async fn get(
            &self,
            _url: &str,
            _timeout: Duration,
            _progress: &dyn ProgressListener,
        ) -> std::result::Result<Bytes, TransportError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_rejects_zero_attempts() {
        let downloader = Downloader::new(FixedTransport(Bytes::from_static(b"x")));
        let settings = DownloadSettings {
            retry: RetryPolicy::new(0),
            ..Default::default()
        };

        let result = downloader
            .download("ID", &settings, &NoProgress, &CancelToken::never())
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_rejects_zero_timeout() {
        let downloader = Downloader::new(FixedTransport(Bytes::from_static(b"x")));
        let settings = DownloadSettings {
            timeout: Duration::ZERO,
            ..Default::default()
        };

        let result = downloader
            .download("ID", &settings, &NoProgress, &CancelToken::never())
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_returns_body() {
        let downloader = Downloader::new(FixedTransport(Bytes::from_static(b"PK")));

        let bytes = downloader
            .download("ID", &DownloadSettings::default(), &NoProgress, &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"PK");
    }
}

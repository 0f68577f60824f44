//! # sheetpull-http
//!
//! Downloads a spreadsheet's xlsx export.
//!
//! ```text
//! Downloader (retry loop, timeout, cancellation)
//!     └── Transport (one GET, streams progress)
//!           └── HttpTransport (reqwest)
//! ```
//!
//! Attempts run sequentially. By default a failed attempt is retried
//! immediately; [`Backoff::Exponential`] adds a growing pause between attempts.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetpull_http::{CancelToken, DownloadSettings, Downloader, HttpTransport, NoProgress};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(Default::default())?;
//! let downloader = Downloader::new(transport);
//!
//! let bytes = downloader
//!     .download("ABC123", &DownloadSettings::default(), &NoProgress, &CancelToken::never())
//!     .await?;
//! println!("{} bytes", bytes.len());
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod downloader;
pub mod error;
pub mod progress;
pub mod retry;
pub mod transport;

pub use cancel::{cancellation, CancelToken, CancellationHandle};
pub use downloader::{DownloadSettings, Downloader, DEFAULT_TIMEOUT};
pub use error::TransportError;
pub use progress::{ChannelProgress, DownloadProgress, NoProgress, ProgressListener};
pub use retry::{Backoff, RetryPolicy, DEFAULT_RETRIES};
pub use transport::{HttpTransport, HttpTransportConfig, Transport};

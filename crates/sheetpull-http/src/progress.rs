//! Download progress reporting

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Bytes received so far for one download attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownloadProgress {
    /// Bytes received
    pub loaded: u64,
    /// Expected size; 0 when the server sent no length
    pub total: u64,
    /// `loaded / total` as 0..=100; 0 when the size is unknown
    pub percent: u8,
}

impl DownloadProgress {
    /// Compute progress for `loaded` of `total` bytes
    pub fn new(loaded: u64, total: u64) -> Self {
        let percent = if total == 0 {
            0
        } else {
            (loaded.saturating_mul(100) / total).min(100) as u8
        };
        Self {
            loaded,
            total,
            percent,
        }
    }
}

/// Receives progress events, synchronously, as bytes arrive
pub trait ProgressListener: Send + Sync {
    /// Called after each received chunk
    fn on_progress(&self, progress: DownloadProgress);
}

impl<F> ProgressListener for F
where
    F: Fn(DownloadProgress) + Send + Sync,
{
    fn on_progress(&self, progress: DownloadProgress) {
        self(progress)
    }
}

/// Discards progress events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn on_progress(&self, _progress: DownloadProgress) {}
}

/// Forwards progress events into a channel, turning them into a stream
#[derive(Debug, Clone)]
pub struct ChannelProgress(pub UnboundedSender<DownloadProgress>);

impl ProgressListener for ChannelProgress {
    fn on_progress(&self, progress: DownloadProgress) {
        // A dropped receiver only means nobody is watching
        let _ = self.0.send(progress);
    }
}

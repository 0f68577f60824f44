//! Caller-driven cancellation

use tokio::sync::watch;

/// Create a connected handle/token pair
pub fn cancellation() -> (CancellationHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancellationHandle { tx }, CancelToken { rx: Some(rx) })
}

/// Cancels every [`CancelToken`] created from the same pair
#[derive(Debug)]
pub struct CancellationHandle {
    tx: watch::Sender<bool>,
}

impl CancellationHandle {
    /// Request cancellation
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Create another token observing this handle
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: Some(self.tx.subscribe()),
        }
    }
}

/// Observes a [`CancellationHandle`]
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelToken {
    /// A token that is never cancelled
    pub fn never() -> Self {
        Self { rx: None }
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolve once cancellation is requested.
    ///
    /// Pends forever when the token can never be cancelled, including after the
    /// handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        if let Some(rx) = &self.rx {
            let mut rx = rx.clone();
            if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_wakes_waiter() {
        let (handle, token) = cancellation();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("token should resolve");
    }

    #[tokio::test]
    async fn test_subscribed_token() {
        let (handle, _token) = cancellation();
        let other = handle.token();
        handle.cancel();
        assert!(other.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_token_pends() {
        let token = CancelToken::never();
        let waited = tokio::time::timeout(Duration::from_secs(5), token.cancelled()).await;
        assert!(waited.is_err());
        assert!(!token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_pends() {
        let (handle, token) = cancellation();
        drop(handle);
        let waited = tokio::time::timeout(Duration::from_secs(5), token.cancelled()).await;
        assert!(waited.is_err());
    }
}

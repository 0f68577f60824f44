//! Retry policy

use std::time::Duration;

/// Default number of download attempts
pub const DEFAULT_RETRIES: u32 = 3;

/// Pause between consecutive attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Retry immediately
    #[default]
    None,
    /// Wait `base * 2^(n-1)` before the n-th retry, never longer than `max`
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay before retry number `retry` (1 for the second attempt)
    pub fn delay(&self, retry: u32) -> Option<Duration> {
        match *self {
            Backoff::None => None,
            Backoff::Exponential { base, max } => {
                let exponent = retry.saturating_sub(1).min(16);
                let multiplier = 2_u32.saturating_pow(exponent);
                Some(base.saturating_mul(multiplier).min(max))
            }
        }
    }
}

/// How many attempts a download gets and how they are spaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first; must be at least 1
    pub attempts: u32,
    /// Pause between attempts
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// `attempts` immediate attempts
    pub fn new(attempts: u32) -> Self {
        Self {
            attempts,
            backoff: Backoff::None,
        }
    }

    /// Use `backoff` between attempts
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRIES)
    }
}

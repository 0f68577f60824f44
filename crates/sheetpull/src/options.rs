//! Fetch options

use std::time::Duration;

use sheetpull_core::{Error, Result};
use sheetpull_http::{
    Backoff, CancelToken, DownloadSettings, RetryPolicy, DEFAULT_RETRIES, DEFAULT_TIMEOUT,
};

/// Options for one fetch
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Shared spreadsheet link
    pub link: String,
    /// Sheets to extract, in order; empty means every sheet
    pub sheets: Vec<String>,
    /// Time limit for each download attempt. Default: 30 seconds.
    pub timeout: Duration,
    /// Download attempts. Default: 3.
    pub retries: u32,
    /// Pause between download attempts. Default: none.
    pub backoff: Backoff,
    /// Aborts the fetch when cancelled
    pub cancel: CancelToken,
}

impl FetchOptions {
    /// Options for `link` with every other setting at its default
    pub fn new<S: Into<String>>(link: S) -> Self {
        Self {
            link: link.into(),
            sheets: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            backoff: Backoff::None,
            cancel: CancelToken::never(),
        }
    }

    /// Restrict the fetch to `sheets`
    pub fn with_sheets<I, S>(mut self, sheets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sheets = sheets.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the fetch to a comma-separated list of sheet names
    pub fn with_sheet_list(mut self, list: &str) -> Self {
        self.sheets = parse_sheet_list(list);
        self
    }

    /// Set the per-attempt time limit
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of download attempts
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the pause between download attempts
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Tie the fetch to a cancellation token
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Download limits derived from these options
    pub fn download_settings(&self) -> DownloadSettings {
        DownloadSettings {
            timeout: self.timeout,
            retry: RetryPolicy::new(self.retries).with_backoff(self.backoff),
        }
    }

    /// Check parameter shapes before any work is done
    pub fn validate(&self) -> Result<()> {
        if self.link.trim().is_empty() {
            return Err(Error::validation("link must be a non-empty string"));
        }
        self.download_settings().validate()
    }

    /// Requested sheet names, trimmed, without blanks or repeats, first occurrence kept
    pub fn requested_sheets(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.sheets.len());
        for name in self.sheets.iter().map(|name| name.trim()) {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

/// Split a comma-separated sheet list, trimming names and dropping empty entries
pub fn parse_sheet_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

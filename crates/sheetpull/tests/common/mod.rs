//! Shared helpers for orchestrator tests: an in-memory transport serving a
//! prepared workbook.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use bytes::Bytes;
use sheetpull::{DownloadProgress, ProgressListener, Transport, TransportError};
use sheetpull_xlsx::fixture::XlsxFixture;

pub const LINK: &str = "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=0";

/// Serves the same response to every request
pub struct StaticTransport {
    response: Result<Bytes, u16>,
    calls: AtomicU32,
}

impl StaticTransport {
    pub fn serving(bytes: Vec<u8>) -> Self {
        Self {
            response: Ok(Bytes::from(bytes)),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for StaticTransport {
    async fn get(
        &self,
        _url: &str,
        _timeout: Duration,
        progress: &dyn ProgressListener,
    ) -> Result<Bytes, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(bytes) => {
                let total = bytes.len() as u64;
                progress.on_progress(DownloadProgress::new(total, total));
                Ok(bytes.clone())
            }
            Err(status) => Err(TransportError::Status(*status)),
        }
    }
}

/// A catalogue workbook: a titled `categories` sheet with a metadata row and a
/// `products` sheet with five rows
pub fn catalogue() -> Vec<u8> {
    XlsxFixture::new()
        .text_sheet(
            "categories",
            &[
                &["Category list", "", ""],
                &["id", "name", "parent id"],
                &["type", "string", "integer"],
                &["1", "Tools", ""],
                &["2", "Hand tools", "1"],
            ],
        )
        .text_sheet(
            "products",
            &[
                &["sku", "title", "price"],
                &["100", "Hammer", "12.50"],
                &["101", "Saw", "20"],
                &["102", "Chisel", ".75"],
                &["103", "Level", "n/a"],
                &["104", "Tape", "3.10"],
            ],
        )
        .build()
}

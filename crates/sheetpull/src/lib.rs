//! # sheetpull
//!
//! Turn a publicly shared spreadsheet link into typed records, one list per sheet.
//!
//! A fetch resolves the link to a spreadsheet identifier, downloads the xlsx
//! export (with a timeout, retries and optional progress reporting), decodes it
//! and, for each requested sheet, locates the header row, skips column-metadata
//! rows and coerces every data row into a [`Record`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetpull::prelude::*;
//!
//! # async fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let fetcher = SheetFetcher::new()?;
//! let options = FetchOptions::new("https://docs.google.com/spreadsheets/d/ABC123/edit")
//!     .with_sheet_list("categories, products");
//!
//! let result = fetcher.fetch(&options).await;
//! if result.is_success() {
//!     for (sheet, count) in result.summary() {
//!         println!("{sheet}: {count} records");
//!     }
//! } else {
//!     eprintln!("{}", result.error().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod fetcher;
pub mod options;
pub mod prelude;

pub use fetcher::{select_sheets, SheetFetcher};
pub use options::{parse_sheet_list, FetchOptions};

// Re-export core types
pub use sheetpull_core::{
    create_link,
    export_url,
    // Extraction stages
    extract,
    parse_link,
    resolve_identifier,
    validate,
    CellGrid,
    CellValue,
    // Error types
    Error,
    FetchResult,
    FieldValue,
    ParsedLink,
    Record,
    Result,
    SheetResult,
    SheetSummary,
};

// Re-export download types
pub use sheetpull_http::{
    cancellation, Backoff, CancelToken, CancellationHandle, ChannelProgress, DownloadProgress,
    DownloadSettings, HttpTransport, HttpTransportConfig, NoProgress, ProgressListener,
    RetryPolicy, Transport, TransportError, DEFAULT_RETRIES, DEFAULT_TIMEOUT,
};

// Re-export decoding types
pub use sheetpull_xlsx::DecodedWorkbook;

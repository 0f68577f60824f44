//! Prelude module - common imports for sheetpull users
//!
//! ```rust
//! use sheetpull::prelude::*;
//! ```

pub use crate::{
    // Cancellation
    cancellation,
    CancelToken,
    // Progress
    ChannelProgress,
    DownloadProgress,
    // Error types
    Error,
    // Fetching
    FetchOptions,
    FetchResult,
    FieldValue,
    NoProgress,
    ProgressListener,
    Record,
    Result,
    SheetFetcher,
};

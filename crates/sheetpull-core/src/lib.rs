//! # sheetpull-core
//!
//! Core data structures and pure transforms for the sheetpull extraction pipeline.
//!
//! This crate performs no I/O. It provides:
//! - [`link`] - Resolving shared spreadsheet links to identifiers and back
//! - [`CellValue`] and [`CellGrid`] - The decoded form of one sheet
//! - [`extract`] - Header detection, meta-row skipping and row normalization
//! - [`FieldValue`], [`Record`] and [`FetchResult`] - The typed output of a fetch
//! - [`Error`] - The error kinds shared by every sheetpull crate
//!
//! ## Example
//!
//! ```rust
//! use sheetpull_core::{extract::extract_records, CellValue, FieldValue};
//!
//! let grid = vec![
//!     vec![CellValue::from("id"), CellValue::from("name")],
//!     vec![CellValue::from("type"), CellValue::from("string")],
//!     vec![CellValue::from(1.0), CellValue::from("Widget")],
//! ];
//!
//! let records = extract_records(&grid);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0]["id"], FieldValue::Integer(1));
//! ```

pub mod cell;
pub mod error;
pub mod extract;
pub mod link;
pub mod record;
pub mod result;

pub use cell::{CellGrid, CellValue};
pub use error::{Error, Result};
pub use link::{create_link, export_url, parse_link, resolve_identifier, validate, ParsedLink};
pub use record::{FieldValue, Record, SheetResult};
pub use result::{FetchResult, SheetSummary};

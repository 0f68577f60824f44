//! Sheet extraction: header detection, meta-row skipping and row normalization
//!
//! Every stage is a pure function of an already-decoded [`CellGrid`], so sheets
//! can be processed independently.

pub mod header;
pub mod meta;
pub mod rows;

pub use header::{clean_header_cell, clean_label, detect_header, HeaderRow, MAX_HEADER_SCAN_ROWS};
pub use meta::{find_data_start, is_meta_row, MAX_META_SCAN_ROWS, META_KEYWORDS};
pub use rows::{build_record, is_placeholder_row, normalize_rows, PLACEHOLDER_VALUES};

use crate::cell::CellGrid;
use crate::record::Record;

/// Run the full extraction on one sheet.
///
/// A sheet without a recognisable header yields no records.
pub fn extract_records(grid: &CellGrid) -> Vec<Record> {
    let Some(header) = detect_header(grid) else {
        tracing::debug!(rows = grid.len(), "no header row found");
        return Vec::new();
    };

    let start = find_data_start(grid, header.index);
    tracing::debug!(
        header_row = header.index,
        data_start = start,
        columns = header.labels.len(),
        "located sheet layout"
    );

    normalize_rows(grid, &header.labels, start)
}

/// Keep the records from the 1-based `start_from_row` onwards
pub fn apply_row_offset(mut records: Vec<Record>, start_from_row: usize) -> Vec<Record> {
    let skip = start_from_row.saturating_sub(1);
    if skip >= records.len() {
        records.clear();
    } else {
        records.drain(..skip);
    }
    records
}

//! Header row detection and label cleaning

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cell::{CellGrid, CellValue};

/// Number of leading rows searched for a header
pub const MAX_HEADER_SCAN_ROWS: usize = 5;

/// Minimum number of non-blank cells a header row must have
pub const MIN_HEADER_CELLS: usize = 2;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.-]").unwrap());

/// The detected header: its row index and one cleaned label per column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    /// 0-based row index within the grid
    pub index: usize,
    /// Cleaned labels; never empty strings
    pub labels: Vec<String>,
}

/// Find the header row among the first [`MAX_HEADER_SCAN_ROWS`] rows.
///
/// The first row with at least [`MIN_HEADER_CELLS`] non-blank cells wins.
pub fn detect_header(grid: &CellGrid) -> Option<HeaderRow> {
    grid.iter()
        .take(MAX_HEADER_SCAN_ROWS)
        .position(|row| row.iter().filter(|cell| !cell.is_blank()).count() >= MIN_HEADER_CELLS)
        .map(|index| HeaderRow {
            index,
            labels: grid[index]
                .iter()
                .enumerate()
                .map(|(col, cell)| clean_header_cell(cell, col))
                .collect(),
        })
}

/// Clean one header cell, synthesizing `Column_<n>` (1-based) when nothing usable remains
pub fn clean_header_cell(cell: &CellValue, col: usize) -> String {
    clean_label(&cell.text()).unwrap_or_else(|| format!("Column_{}", col + 1))
}

/// Normalize a header label.
///
/// Collapses whitespace runs (line breaks included) to single spaces and strips
/// anything other than word characters, whitespace, `-`, `_` and `.`. Returns
/// `None` when the result is empty.
pub fn clean_label(raw: &str) -> Option<String> {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    let stripped = DISALLOWED_CHARS.replace_all(&collapsed, "");
    let cleaned = WHITESPACE_RUN.replace_all(stripped.trim(), " ").into_owned();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

//! Skipping column-metadata rows between the header and the data

use crate::cell::{row_is_blank, CellGrid, CellValue};

/// Number of rows after the header inspected for metadata
pub const MAX_META_SCAN_ROWS: usize = 10;

/// Substrings that mark a row's first cell as column metadata (matched lowercase)
pub const META_KEYWORDS: &[&str] = &[
    "length",
    "description",
    "constraint",
    "type",
    "format",
    "validation",
    "rule",
    "example",
    "note",
    "remark",
    "comment",
];

/// Return the index of the first data row after `header_index`.
///
/// Blank rows and rows whose first cell names a metadata keyword are skipped.
/// The first other row with content beyond column one is the data start. When
/// the scan window runs out first, its end is returned, which may lie past the
/// grid and yields no data rows.
pub fn find_data_start(grid: &CellGrid, header_index: usize) -> usize {
    let first = header_index + 1;
    let window_end = (first + MAX_META_SCAN_ROWS).min(grid.len().max(first));

    for index in first..window_end {
        let row = &grid[index];
        if row_is_blank(row) || is_meta_row(row) {
            continue;
        }
        if row.iter().skip(1).any(|cell| !cell.is_blank()) {
            return index;
        }
    }

    window_end
}

/// Check whether the first cell of a row names a metadata keyword
pub fn is_meta_row(row: &[CellValue]) -> bool {
    let Some(first) = row.first() else {
        return false;
    };
    let label = first.text().trim().to_lowercase();
    !label.is_empty() && META_KEYWORDS.iter().any(|keyword| label.contains(keyword))
}

//! Row normalization into typed records

use crate::cell::{row_is_blank, CellGrid, CellValue};
use crate::record::{FieldValue, Record};

/// Cell texts treated as "no meaningful data" when a whole row consists of them.
///
/// A row of literal zeros is dropped along with blank rows.
pub const PLACEHOLDER_VALUES: &[&str] = &["", "0", "null", "undefined"];

/// Build one record per retained row from `start` to the end of the grid
pub fn normalize_rows(grid: &CellGrid, labels: &[String], start: usize) -> Vec<Record> {
    grid.iter()
        .skip(start)
        .filter(|row| !row_is_blank(row) && !is_placeholder_row(row))
        .filter_map(|row| build_record(row, labels))
        .collect()
}

/// Check whether every cell of a row is a placeholder value
pub fn is_placeholder_row(row: &[CellValue]) -> bool {
    row.iter()
        .all(|cell| PLACEHOLDER_VALUES.contains(&cell.text().trim()))
}

/// Build a record keyed by `labels`; `None` when no field carries content
pub fn build_record(row: &[CellValue], labels: &[String]) -> Option<Record> {
    let mut record = Record::with_capacity(labels.len());
    let mut has_content = false;

    for (col, label) in labels.iter().enumerate() {
        let value = row
            .get(col)
            .map(|cell| FieldValue::coerce(&cell.text()))
            .unwrap_or(FieldValue::Null);
        has_content |= value.has_content();
        record.insert(label.clone(), value);
    }

    has_content.then_some(record)
}

//! Conversion from calamine cells to sheetpull cells

use calamine::{Data, Range};
use chrono::{NaiveDate, NaiveDateTime};
use sheetpull_core::{CellGrid, CellValue};

/// Convert a calamine range into a grid anchored at A1.
///
/// calamine trims leading empty rows and columns from a range; they are
/// restored here so row positions match the sheet. Each row ends at its last
/// non-empty cell, so a stray cell far to the right does not widen other rows.
pub fn range_to_grid(range: &Range<Data>) -> CellGrid {
    let Some((start_row, start_col)) = range.start() else {
        return CellGrid::new();
    };
    let start_row = start_row as usize;
    let start_col = start_col as usize;

    let mut grid = CellGrid::with_capacity(start_row + range.height());
    grid.resize_with(start_row, Vec::new);

    for row in range.rows() {
        let filled = row
            .iter()
            .rposition(|cell| !matches!(cell, Data::Empty))
            .map_or(0, |last| last + 1);

        let mut cells = Vec::new();
        if filled > 0 {
            cells.reserve(start_col + filled);
            cells.resize(start_col, CellValue::Empty);
            cells.extend(row[..filled].iter().map(convert_cell));
        }
        grid.push(cells);
    }

    grid
}

/// Convert a single calamine cell.
///
/// Date cells honour the workbook's date system (1900 or 1904); durations
/// and dates outside chrono's range keep their serial value.
pub fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Float(n) => CellValue::Number(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

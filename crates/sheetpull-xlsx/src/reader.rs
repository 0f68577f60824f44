//! Workbook reader

use std::io::Cursor;

use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use sheetpull_core::{CellGrid, Error, Result};

use crate::convert::range_to_grid;

/// A decoded workbook whose sheets are converted to grids on demand.
///
/// Sheet names are read eagerly; each [`grid`](Self::grid) call reads one sheet,
/// so a damaged sheet fails on its own without affecting the others.
pub struct DecodedWorkbook {
    sheets: Sheets<Cursor<Bytes>>,
    names: Vec<String>,
}

impl DecodedWorkbook {
    /// Decode workbook bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the bytes are not a supported workbook or
    /// the workbook has no sheets.
    pub fn decode(bytes: Bytes) -> Result<Self> {
        let size = bytes.len();
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| Error::decode(e.to_string()))?;

        let names = sheets.sheet_names();
        if names.is_empty() {
            return Err(Error::decode("workbook contains no sheets"));
        }

        tracing::debug!(bytes = size, sheets = names.len(), "decoded workbook");
        Ok(Self { sheets, names })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> &[String] {
        &self.names
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.names.len()
    }

    /// Check whether a sheet exists (exact name match)
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Read one sheet into a grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sheet`] when the sheet is missing or cannot be read.
    pub fn grid(&mut self, name: &str) -> Result<CellGrid> {
        if !self.contains(name) {
            return Err(Error::Sheet {
                name: name.to_string(),
                message: "sheet not found".into(),
            });
        }

        let range = self.sheets.worksheet_range(name).map_err(|e| Error::Sheet {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        Ok(range_to_grid(&range))
    }

    /// Consume the workbook, returning only its sheet names
    pub fn into_sheet_names(self) -> Vec<String> {
        self.names
    }
}

impl std::fmt::Debug for DecodedWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedWorkbook")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{FixtureCell, XlsxFixture};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sheetpull_core::CellValue;

    fn sample() -> Bytes {
        XlsxFixture::new()
            .sheet(
                "categories",
                vec![
                    vec!["id".into(), "name".into(), "active".into()],
                    vec![1.0.into(), "Tools".into(), FixtureCell::Bool(true)],
                ],
            )
            .sheet(
                "events",
                vec![
                    vec!["when".into(), "what".into()],
                    vec![FixtureCell::Date(45000.0), "launch".into()],
                ],
            )
            .build()
            .into()
    }

    #[test]
    fn test_sheet_names_in_order() {
        let workbook = DecodedWorkbook::decode(sample()).unwrap();
        assert_eq!(workbook.sheet_names(), ["categories", "events"]);
        assert_eq!(workbook.sheet_count(), 2);
        assert!(workbook.contains("events"));
        assert!(!workbook.contains("Events"));
    }

    #[test]
    fn test_grid_values() {
        let mut workbook = DecodedWorkbook::decode(sample()).unwrap();
        let grid = workbook.grid("categories").unwrap();

        assert_eq!(
            grid,
            vec![
                vec![
                    CellValue::from("id"),
                    CellValue::from("name"),
                    CellValue::from("active"),
                ],
                vec![
                    CellValue::Number(1.0),
                    CellValue::from("Tools"),
                    CellValue::Bool(true),
                ],
            ]
        );
    }

    #[test]
    fn test_dates_are_materialized() {
        let mut workbook = DecodedWorkbook::decode(sample()).unwrap();
        let grid = workbook.grid("events").unwrap();

        let expected = NaiveDate::from_ymd_opt(2023, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(grid[1][0], CellValue::DateTime(expected));
    }

    #[test]
    fn test_missing_sheet_is_a_sheet_error() {
        let mut workbook = DecodedWorkbook::decode(sample()).unwrap();
        assert!(matches!(
            workbook.grid("nope"),
            Err(Error::Sheet { name, .. }) if name == "nope"
        ));
    }

    #[test]
    fn test_unreadable_sheet_fails_alone() {
        let bytes = XlsxFixture::new()
            .text_sheet("good", &[&["a", "b"], &["1", "2"]])
            .broken_sheet("bad")
            .build();
        let mut workbook = DecodedWorkbook::decode(bytes.into()).unwrap();

        assert_eq!(workbook.sheet_names(), ["good", "bad"]);
        assert!(matches!(workbook.grid("bad"), Err(Error::Sheet { .. })));
        assert_eq!(workbook.grid("good").unwrap().len(), 2);
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let result = DecodedWorkbook::decode(Bytes::from_static(b"<html>not a workbook</html>"));
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}

//! Cell value types

use std::borrow::Cow;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};

/// One sheet as produced by the workbook decoder: rows of cells, top to bottom.
///
/// Rows are not required to share a length; a missing cell reads as empty.
pub type CellGrid = Vec<Vec<CellValue>>;

/// Represents a scalar value read from a decoded cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Bool(bool),

    /// Numeric value
    Number(f64),

    /// String value
    String(String),

    /// Date or date-time value
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell has no visible content once trimmed
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text form of the cell, used for header labels and value coercion.
    ///
    /// Integral numbers render without a fractional part, booleans as
    /// `true`/`false`, dates as ISO-8601 (date only at midnight).
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            CellValue::Number(n) => Cow::Owned(format_number(*n)),
            CellValue::String(s) => Cow::Borrowed(s.as_str()),
            CellValue::DateTime(dt) => {
                if dt.time() == NaiveTime::MIN {
                    Cow::Owned(dt.format("%Y-%m-%d").to_string())
                } else {
                    Cow::Owned(dt.format("%Y-%m-%dT%H:%M:%S").to_string())
                }
            }
        }
    }

    /// Trimmed text form of the cell
    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Get the type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Bool(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::String(_) => "string",
            CellValue::DateTime(_) => "datetime",
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Check whether every cell of a row is blank (an absent row counts as blank)
pub fn row_is_blank(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_number_text() {
        assert_eq!(CellValue::Number(42.0).text(), "42");
        assert_eq!(CellValue::Number(-7.0).text(), "-7");
        assert_eq!(CellValue::Number(3.25).text(), "3.25");
        assert_eq!(CellValue::Number(0.0).text(), "0");
    }

    #[test]
    fn test_date_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let midnight = CellValue::DateTime(date.and_hms_opt(0, 0, 0).unwrap());
        let afternoon = CellValue::DateTime(date.and_hms_opt(14, 5, 0).unwrap());

        assert_eq!(midnight.text(), "2024-03-09");
        assert_eq!(afternoon.text(), "2024-03-09T14:05:00");
    }

    #[test]
    fn test_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::from(" x ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Bool(false).is_blank());
    }

    #[test]
    fn test_row_is_blank() {
        assert!(row_is_blank(&[]));
        assert!(row_is_blank(&[CellValue::Empty, CellValue::from(" ")]));
        assert!(!row_is_blank(&[CellValue::Empty, CellValue::from("a")]));
    }
}

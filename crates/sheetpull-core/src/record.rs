//! Typed output records

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*\.[0-9]+$").unwrap());

/// One structured row, keyed by cleaned header label in column order.
///
/// Duplicate header labels collapse into a single key holding the rightmost value.
pub type Record = IndexMap<String, FieldValue>;

/// Records per sheet name, in processing order
pub type SheetResult = IndexMap<String, Vec<Record>>;

/// A coerced scalar stored in a [`Record`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Missing or blank cell
    Null,
    /// All-digit text
    Integer(i64),
    /// Optional digits, a period, then digits
    Float(f64),
    /// Anything else, trimmed
    String(String),
}

impl FieldValue {
    /// Coerce cell text into a typed value.
    ///
    /// Blank text becomes [`FieldValue::Null`]. Signs, exponents and thousands
    /// separators are not recognised, so `"-5"` stays a string. Digit runs too
    /// large for `i64` also stay strings.
    pub fn coerce(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return FieldValue::Null;
        }

        if INTEGER_PATTERN.is_match(text) {
            if let Ok(n) = text.parse::<i64>() {
                return FieldValue::Integer(n);
            }
        } else if FLOAT_PATTERN.is_match(text) {
            if let Ok(n) = text.parse::<f64>() {
                return FieldValue::Float(n);
            }
        }

        FieldValue::String(text.to_string())
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Check if the value carries content (non-null, non-empty string)
    pub fn has_content(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Try to get the value as an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a float (integers widen)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::String(s) => f.write_str(s),
        }
    }
}

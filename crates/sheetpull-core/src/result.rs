//! Fetch outcome

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Error;
use crate::record::{Record, SheetResult};

/// Record count per sheet name, in the same order as the data
pub type SheetSummary = IndexMap<String, usize>;

/// The outcome of one fetch.
///
/// Built once through [`FetchResult::completed`] or [`FetchResult::failed`]; the
/// summary is derived from the data so every data key has a matching count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    success: bool,
    sheet_id: String,
    total_sheets: usize,
    data: SheetResult,
    summary: SheetSummary,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FetchResult {
    /// A successful fetch of `data` from spreadsheet `sheet_id`
    pub fn completed<S: Into<String>>(sheet_id: S, data: SheetResult) -> Self {
        let summary = data
            .iter()
            .map(|(name, records)| (name.clone(), records.len()))
            .collect();

        Self {
            success: true,
            sheet_id: sheet_id.into(),
            total_sheets: data.len(),
            data,
            summary,
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// A failed fetch; `sheet_id` is empty when the link never resolved
    pub fn failed<S: Into<String>>(sheet_id: S, error: &Error) -> Self {
        Self {
            success: false,
            sheet_id: sheet_id.into(),
            total_sheets: 0,
            data: SheetResult::new(),
            summary: SheetSummary::new(),
            timestamp: Utc::now(),
            error: Some(error.to_string()),
        }
    }

    /// Whether the fetch succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The resolved spreadsheet identifier
    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    /// Number of sheets in the result
    pub fn total_sheets(&self) -> usize {
        self.total_sheets
    }

    /// Records per sheet
    pub fn data(&self) -> &SheetResult {
        &self.data
    }

    /// Records of one sheet
    pub fn sheet(&self, name: &str) -> Option<&[Record]> {
        self.data.get(name).map(Vec::as_slice)
    }

    /// Record count per sheet
    pub fn summary(&self) -> &SheetSummary {
        &self.summary
    }

    /// Total records across all sheets
    pub fn record_count(&self) -> usize {
        self.summary.values().sum()
    }

    /// When the result was produced
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Failure message, if the fetch failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Consume the result, returning the per-sheet records
    pub fn into_data(self) -> SheetResult {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use pretty_assertions::assert_eq;

    fn record(value: i64) -> Record {
        let mut record = Record::new();
        record.insert("id".into(), FieldValue::Integer(value));
        record
    }

    #[test]
    fn test_completed_summary_matches_data() {
        let mut data = SheetResult::new();
        data.insert("products".into(), vec![record(1), record(2)]);
        data.insert("missing".into(), Vec::new());

        let result = FetchResult::completed("ABC", data);

        assert!(result.is_success());
        assert_eq!(result.total_sheets(), 2);
        assert_eq!(result.record_count(), 2);
        assert_eq!(
            result.summary().keys().collect::<Vec<_>>(),
            result.data().keys().collect::<Vec<_>>()
        );
        for (name, records) in result.data() {
            assert_eq!(result.summary()[name], records.len());
        }
    }

    #[test]
    fn test_failed_result() {
        let result = FetchResult::failed("", &Error::InvalidLink("nope".into()));

        assert!(!result.is_success());
        assert_eq!(result.total_sheets(), 0);
        assert!(result.data().is_empty());
        assert_eq!(result.error(), Some("Invalid spreadsheet link: nope"));
    }

    #[test]
    fn test_serialized_shape() {
        let mut data = SheetResult::new();
        data.insert("s".into(), vec![record(7)]);
        let json = serde_json::to_value(FetchResult::completed("ID", data)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["sheetId"], "ID");
        assert_eq!(json["totalSheets"], 1);
        assert_eq!(json["data"]["s"][0]["id"], 7);
        assert_eq!(json["summary"]["s"], 1);
        assert!(json["timestamp"].is_string());
        assert!(json.get("error").is_none());
    }
}

//! Fetch orchestration: resolve, download, decode, extract per sheet

use sheetpull_core::extract::{apply_row_offset, extract_records};
use sheetpull_core::{resolve_identifier, Error, FetchResult, Result, SheetResult};
use sheetpull_http::{
    Downloader, HttpTransport, HttpTransportConfig, NoProgress, ProgressListener, Transport,
    TransportError,
};
use sheetpull_xlsx::DecodedWorkbook;

use crate::options::FetchOptions;

/// Turns spreadsheet links into typed records.
///
/// Holds no state between calls; every fetch owns its bytes, grids and result.
#[derive(Debug, Clone)]
pub struct SheetFetcher<T = HttpTransport> {
    downloader: Downloader<T>,
}

impl SheetFetcher<HttpTransport> {
    /// Create a fetcher over HTTP with default client settings
    pub fn new() -> std::result::Result<Self, TransportError> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a fetcher over HTTP with `config`
    pub fn with_config(config: HttpTransportConfig) -> std::result::Result<Self, TransportError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> SheetFetcher<T> {
    /// Create a fetcher over a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            downloader: Downloader::new(transport),
        }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        self.downloader.transport()
    }

    /// Fetch and extract the requested sheets.
    ///
    /// Never fails: every error is reported through [`FetchResult::error`] with
    /// `success == false`. A requested sheet missing from the workbook, or one
    /// that cannot be read, maps to an empty record list as long as at least one
    /// requested sheet exists.
    pub async fn fetch(&self, options: &FetchOptions) -> FetchResult {
        self.fetch_with_progress(options, &NoProgress).await
    }

    /// [`fetch`](Self::fetch), reporting download progress to `progress`
    pub async fn fetch_with_progress(
        &self,
        options: &FetchOptions,
        progress: &dyn ProgressListener,
    ) -> FetchResult {
        self.run(options, progress, None).await
    }

    /// Fetch, then keep each sheet's records from the 1-based `start_from_row` on.
    ///
    /// A `start_from_row` below 1 fails the fetch before any network access.
    pub async fn fetch_from_row(
        &self,
        options: &FetchOptions,
        start_from_row: i64,
        progress: &dyn ProgressListener,
    ) -> FetchResult {
        let start = match usize::try_from(start_from_row) {
            Ok(start) if start >= 1 => start,
            _ => {
                let error = Error::validation(format!(
                    "startFromRow must be a positive integer, got {}",
                    start_from_row
                ));
                return FetchResult::failed("", &error);
            }
        };
        self.run(options, progress, Some(start)).await
    }

    /// Fetch a comma-separated list of sheets (all sheets when blank) from row
    /// `start_from_row` on, with default download settings
    pub async fn fetch_sheet_list(
        &self,
        link: &str,
        sheets: &str,
        start_from_row: i64,
    ) -> FetchResult {
        let options = FetchOptions::new(link).with_sheet_list(sheets);
        self.fetch_from_row(&options, start_from_row, &NoProgress).await
    }

    /// Resolve, download and decode `link`, returning only its sheet names
    pub async fn list_sheet_names(&self, link: &str) -> Result<Vec<String>> {
        self.list_sheet_names_with(&FetchOptions::new(link)).await
    }

    /// [`list_sheet_names`](Self::list_sheet_names) honouring the download
    /// settings and cancellation of `options`
    pub async fn list_sheet_names_with(&self, options: &FetchOptions) -> Result<Vec<String>> {
        options.validate()?;
        let identifier = resolve_identifier(&options.link)?;
        let workbook = self.download_workbook(&identifier, options, &NoProgress).await?;
        Ok(workbook.into_sheet_names())
    }

    async fn run(
        &self,
        options: &FetchOptions,
        progress: &dyn ProgressListener,
        start_from_row: Option<usize>,
    ) -> FetchResult {
        let mut sheet_id = String::new();
        match self.try_fetch(options, progress, start_from_row, &mut sheet_id).await {
            Ok(data) => {
                let result = FetchResult::completed(sheet_id, data);
                tracing::info!(
                    sheet_id = result.sheet_id(),
                    sheets = result.total_sheets(),
                    records = result.record_count(),
                    "fetch complete"
                );
                result
            }
            Err(e) => {
                tracing::warn!(sheet_id = %sheet_id, error = %e, "fetch failed");
                FetchResult::failed(sheet_id, &e)
            }
        }
    }

    async fn try_fetch(
        &self,
        options: &FetchOptions,
        progress: &dyn ProgressListener,
        start_from_row: Option<usize>,
        sheet_id: &mut String,
    ) -> Result<SheetResult> {
        options.validate()?;
        let identifier = resolve_identifier(&options.link)?;
        sheet_id.clone_from(&identifier);
        tracing::debug!(identifier = %identifier, "resolved spreadsheet link");

        let mut workbook = self.download_workbook(&identifier, options, progress).await?;
        let targets = select_sheets(&options.requested_sheets(), workbook.sheet_names())?;

        let mut data = SheetResult::with_capacity(targets.len());
        for name in targets {
            let records = extract_sheet(&mut workbook, &name);
            let records = match start_from_row {
                Some(start) => apply_row_offset(records, start),
                None => records,
            };
            data.insert(name, records);
        }

        Ok(data)
    }

    async fn download_workbook(
        &self,
        identifier: &str,
        options: &FetchOptions,
        progress: &dyn ProgressListener,
    ) -> Result<DecodedWorkbook> {
        let bytes = self
            .downloader
            .download(identifier, &options.download_settings(), progress, &options.cancel)
            .await?;
        DecodedWorkbook::decode(bytes)
    }
}

/// Decide which sheets a fetch covers.
///
/// With nothing requested every available sheet is used. Otherwise the
/// requested names are kept in order, present or not, unless none of them exist.
///
/// # Errors
///
/// Returns [`Error::NoMatchingSheets`] when names were requested and none exist.
pub fn select_sheets(requested: &[String], available: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(available.to_vec());
    }

    if !requested.iter().any(|name| available.contains(name)) {
        return Err(Error::NoMatchingSheets {
            requested: requested.to_vec(),
            available: available.to_vec(),
        });
    }

    for name in requested.iter().filter(|name| !available.contains(name)) {
        tracing::warn!(sheet = %name, "requested sheet not found in workbook");
    }
    Ok(requested.to_vec())
}

/// Extract one sheet; an absent or unreadable sheet yields no records
fn extract_sheet(workbook: &mut DecodedWorkbook, name: &str) -> Vec<sheetpull_core::Record> {
    if !workbook.contains(name) {
        return Vec::new();
    }

    match workbook.grid(name) {
        Ok(grid) => {
            let records = extract_records(&grid);
            tracing::debug!(sheet = %name, records = records.len(), "extracted sheet");
            records
        }
        Err(e) => {
            tracing::warn!(sheet = %name, error = %e, "skipping unreadable sheet");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_all_when_none_requested() {
        let available = names(&["a", "b"]);
        assert_eq!(select_sheets(&[], &available).unwrap(), available);
    }

    #[test]
    fn test_select_keeps_missing_names_alongside_present_ones() {
        let selected = select_sheets(&names(&["b", "zzz"]), &names(&["a", "b"])).unwrap();
        assert_eq!(selected, names(&["b", "zzz"]));
    }

    #[test]
    fn test_select_fails_when_nothing_matches() {
        let err = select_sheets(&names(&["x", "y"]), &names(&["a"])).unwrap_err();
        assert_eq!(
            err,
            Error::NoMatchingSheets {
                requested: names(&["x", "y"]),
                available: names(&["a"]),
            }
        );
    }

    #[test]
    fn test_select_is_case_sensitive() {
        assert!(select_sheets(&names(&["A"]), &names(&["a"])).is_err());
    }
}

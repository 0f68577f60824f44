//! # sheetpull-xlsx
//!
//! Decodes exported workbook bytes into [`CellGrid`]s, one per sheet.
//!
//! Decoding is delegated to `calamine`, which detects xlsx, xls, xlsb and ods
//! content. Sheet order follows the workbook, date cells become
//! [`CellValue::DateTime`] and numbers keep their stored value regardless of
//! display format.
//!
//! [`CellGrid`]: sheetpull_core::CellGrid
//! [`CellValue::DateTime`]: sheetpull_core::CellValue::DateTime

mod convert;
mod reader;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use convert::{convert_cell, range_to_grid};
pub use reader::DecodedWorkbook;

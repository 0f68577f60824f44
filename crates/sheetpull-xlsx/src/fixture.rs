//! Minimal in-memory xlsx builder for tests.
//!
//! Produces just enough of the package (content types, relationships, a style
//! sheet with one date format, and inline-string worksheets) for a reader to
//! open it.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A cell written by [`XlsxFixture`]
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureCell {
    /// No `<c>` element
    Empty,
    /// Inline string
    Text(String),
    /// Plain number
    Number(f64),
    /// Boolean
    Bool(bool),
    /// Serial date number styled with a date format
    Date(f64),
}

impl From<&str> for FixtureCell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            FixtureCell::Empty
        } else {
            FixtureCell::Text(s.to_string())
        }
    }
}

impl From<f64> for FixtureCell {
    fn from(n: f64) -> Self {
        FixtureCell::Number(n)
    }
}

#[derive(Debug)]
struct FixtureSheet {
    name: String,
    rows: Vec<Vec<FixtureCell>>,
    /// Listed in the workbook but its worksheet part is never written
    broken: bool,
}

/// Builder for a workbook of named sheets
#[derive(Debug, Default)]
pub struct XlsxFixture {
    sheets: Vec<FixtureSheet>,
}

impl XlsxFixture {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet
    pub fn sheet<S: Into<String>>(mut self, name: S, rows: Vec<Vec<FixtureCell>>) -> Self {
        self.sheets.push(FixtureSheet {
            name: name.into(),
            rows,
            broken: false,
        });
        self
    }

    /// Append a sheet that is listed in the workbook but cannot be read
    pub fn broken_sheet<S: Into<String>>(mut self, name: S) -> Self {
        self.sheets.push(FixtureSheet {
            name: name.into(),
            rows: Vec::new(),
            broken: true,
        });
        self
    }

    /// Append a sheet given as text rows; empty strings become empty cells
    pub fn text_sheet<S: Into<String>>(self, name: S, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| FixtureCell::from(*cell)).collect())
            .collect();
        self.sheet(name, rows)
    }

    /// Write the package
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buf));
            let options = SimpleFileOptions::default();

            let mut put = |name: &str, body: &str| {
                zip.start_file(name, options).unwrap();
                zip.write_all(body.as_bytes()).unwrap();
            };

            put("[Content_Types].xml", &self.content_types());
            put("_rels/.rels", ROOT_RELS);
            put("xl/workbook.xml", &self.workbook_xml());
            put("xl/_rels/workbook.xml.rels", &self.workbook_rels());
            put("xl/styles.xml", STYLES);
            for (idx, sheet) in self.sheets.iter().enumerate() {
                if !sheet.broken {
                    put(
                        &format!("xl/worksheets/sheet{}.xml", idx + 1),
                        &sheet_xml(&sheet.rows),
                    );
                }
            }

            zip.finish().unwrap();
        }
        buf
    }

    fn content_types(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );
        for (idx, _) in self.sheets.iter().enumerate().filter(|(_, s)| !s.broken) {
            let idx = idx + 1;
            xml.push_str(&format!(
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                idx
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    fn workbook_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
        );
        for (idx, sheet) in self.sheets.iter().enumerate() {
            xml.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(&sheet.name),
                idx + 1,
                idx + 1
            ));
        }
        xml.push_str("</sheets></workbook>");
        xml
    }

    fn workbook_rels(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for idx in 1..=self.sheets.len() {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                idx, idx
            ));
        }
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            self.sheets.len() + 1
        ));
        xml.push_str("</Relationships>");
        xml
    }
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

// Style index 1 carries built-in number format 14 (m/d/yyyy).
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="1"><fill><patternFill patternType="none"/></fill></fills><borders count="1"><border/></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#;

fn sheet_xml(rows: &[Vec<FixtureCell>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_idx + 1;
        xml.push_str(&format!(r#"<row r="{}">"#, row_num));
        for (col_idx, cell) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", column_letters(col_idx), row_num);
            match cell {
                FixtureCell::Empty => {}
                FixtureCell::Text(s) => xml.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    cell_ref,
                    escape(s)
                )),
                FixtureCell::Number(n) => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, n))
                }
                FixtureCell::Bool(b) => xml.push_str(&format!(
                    r#"<c r="{}" t="b"><v>{}</v></c>"#,
                    cell_ref,
                    u8::from(*b)
                )),
                FixtureCell::Date(serial) => xml.push_str(&format!(
                    r#"<c r="{}" s="1"><v>{}</v></c>"#,
                    cell_ref, serial
                )),
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(701), "ZZ");
    }
}

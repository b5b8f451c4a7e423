//! Import file parsers
//!
//! Each parser turns raw file bytes into an ordered sequence of
//! loosely-typed row records keyed by header names. Any error is
//! terminal for the current import attempt and surfaced verbatim.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use commdesk_common::{Error, Result};
use std::io::Cursor;

use super::format::ImportFormat;

/// One source row: header/value pairs in column order
pub type RawRecord = Vec<(String, String)>;

/// Dispatch to the parser chosen by the sniffer
pub fn parse(format: ImportFormat, data: &[u8]) -> Result<Vec<RawRecord>> {
    match format {
        ImportFormat::Csv => parse_csv(data),
        ImportFormat::Spreadsheet => parse_spreadsheet(data),
        ImportFormat::Json => parse_json(data),
        ImportFormat::DelimitedText => parse_delimited_text(data),
    }
}

/// CSV: first row is the header; one record per subsequent row.
/// A malformed row aborts the whole file.
fn parse_csv(data: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Parse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| Error::Parse(e.to_string()))?;
        records.push(
            headers
                .iter()
                .cloned()
                .zip(row.iter().map(|v| v.trim().to_string()))
                .collect(),
        );
    }
    Ok(records)
}

/// Spreadsheet: first sheet only, first row is the header, cells
/// rendered to strings.
fn parse_spreadsheet(data: &[u8]) -> Result<Vec<RawRecord>> {
    let cursor = Cursor::new(data.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| Error::Parse(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Parse("Spreadsheet contains no sheets".to_string()))?
        .map_err(|e| Error::Parse(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(render_cell).collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        records.push(
            headers
                .iter()
                .cloned()
                .zip(row.iter().map(render_cell))
                .collect(),
        );
    }
    Ok(records)
}

/// Render one spreadsheet cell as a trimmed string
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        // Integral floats print without a fractional part
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// JSON: the content must already be an array of flat objects; any other
/// shape fails.
fn parse_json(data: &[u8]) -> Result<Vec<RawRecord>> {
    let value: serde_json::Value =
        serde_json::from_slice(data).map_err(|e| Error::Parse(e.to_string()))?;

    let items = value
        .as_array()
        .ok_or_else(|| Error::Parse("JSON import must be an array of objects".to_string()))?;

    let mut records = Vec::new();
    for item in items {
        let object = item
            .as_object()
            .ok_or_else(|| Error::Parse("JSON import must be an array of objects".to_string()))?;

        let mut record = RawRecord::new();
        for (key, value) in object {
            let rendered = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s.trim().to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(Error::Parse(format!(
                        "JSON field '{}' is not a flat value",
                        key
                    )))
                }
            };
            record.push((key.clone(), rendered));
        }
        records.push(record);
    }
    Ok(records)
}

/// Delimited text: first line is the header, split on comma or tab
/// (comma preferred when both appear), blank lines skipped, fields
/// trimmed.
fn parse_delimited_text(data: &[u8]) -> Result<Vec<RawRecord>> {
    let text = std::str::from_utf8(data)
        .map_err(|_| Error::Parse("Text import is not valid UTF-8".to_string()))?;

    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header_line = match lines.next() {
        Some(line) => line,
        None => return Ok(Vec::new()),
    };

    let delimiter = if header_line.contains(',') { ',' } else { '\t' };
    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for line in lines {
        records.push(
            headers
                .iter()
                .cloned()
                .zip(line.split(delimiter).map(|v| v.trim().to_string()))
                .collect(),
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(record: &'a RawRecord, key: &str) -> Option<&'a str> {
        record
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn csv_rows_keyed_by_header() {
        let data = b"name,email\nAnn,ann@example.com\nBob,bob@example.com\n";
        let records = parse_csv(data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(get(&records[0], "name"), Some("Ann"));
        assert_eq!(get(&records[1], "email"), Some("bob@example.com"));
    }

    #[test]
    fn malformed_csv_row_aborts_the_file() {
        let data = b"name,email\nAnn,ann@example.com\n\"broken\nBob,bob@example.com\n";
        assert!(matches!(parse_csv(data), Err(Error::Parse(_))));
    }

    #[test]
    fn json_array_of_flat_objects() {
        let data = br#"[{"Name":"Ann","Phone":"+1555"}]"#;
        let records = parse_json(data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(get(&records[0], "Name"), Some("Ann"));
        assert_eq!(get(&records[0], "Phone"), Some("+1555"));
    }

    #[test]
    fn json_non_array_shapes_fail() {
        assert!(matches!(
            parse_json(br#"{"Name":"Ann"}"#),
            Err(Error::Parse(_))
        ));
        assert!(matches!(parse_json(br#""just a string""#), Err(Error::Parse(_))));
        assert!(matches!(
            parse_json(br#"[{"Name":{"first":"Ann"}}]"#),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn delimited_text_splits_on_comma_and_skips_blanks() {
        let data = b"name,phone\n\nCy,12345\n   \n";
        let records = parse_delimited_text(data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(get(&records[0], "name"), Some("Cy"));
        assert_eq!(get(&records[0], "phone"), Some("12345"));
    }

    #[test]
    fn delimited_text_falls_back_to_tabs() {
        let data = b"name\tphone\nCy\t12345\n";
        let records = parse_delimited_text(data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(get(&records[0], "phone"), Some("12345"));
    }

    #[test]
    fn delimited_text_trims_fields() {
        let data = b"name , phone\n Cy ,  12345 \n";
        let records = parse_delimited_text(data).unwrap();
        assert_eq!(get(&records[0], "name"), Some("Cy"));
        assert_eq!(get(&records[0], "phone"), Some("12345"));
    }
}

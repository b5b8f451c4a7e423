//! Import format sniffing
//!
//! Strictly by lowercased file extension against a fixed allowlist; no
//! content-based sniffing.

use commdesk_common::{Error, Result};
use std::path::Path;

/// Parsing strategy for an import file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Spreadsheet,
    Json,
    DelimitedText,
}

/// Pick a parser from the file name extension.
///
/// Unsupported extensions abort the pipeline for that file.
pub fn sniff(file_name: &str) -> Result<ImportFormat> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(ImportFormat::Csv),
        "xlsx" | "xls" => Ok(ImportFormat::Spreadsheet),
        "json" => Ok(ImportFormat::Json),
        "txt" => Ok(ImportFormat::DelimitedText),
        _ => Err(Error::Parse(format!(
            "Unsupported file type '{}' (expected .csv, .xlsx, .xls, .json or .txt)",
            file_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_formats() {
        assert_eq!(sniff("contacts.csv").unwrap(), ImportFormat::Csv);
        assert_eq!(sniff("contacts.XLSX").unwrap(), ImportFormat::Spreadsheet);
        assert_eq!(sniff("old.xls").unwrap(), ImportFormat::Spreadsheet);
        assert_eq!(sniff("contacts.json").unwrap(), ImportFormat::Json);
        assert_eq!(sniff("contacts.txt").unwrap(), ImportFormat::DelimitedText);
    }

    #[test]
    fn unsupported_extension_is_a_parse_error() {
        assert!(matches!(sniff("contacts.pdf"), Err(Error::Parse(_))));
        assert!(matches!(sniff("no_extension"), Err(Error::Parse(_))));
    }
}

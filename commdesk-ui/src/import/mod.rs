//! Contact-import pipeline
//!
//! One-shot, synchronous per file: sniff the format from the file name,
//! parse raw rows, normalize them onto the canonical contact shape, and
//! hand the accepted set back for review. Any parser error is terminal
//! for the attempt, with no retry and no partial result.

use commdesk_common::models::ImportedContact;
use commdesk_common::Result;
use serde::Serialize;

pub mod format;
pub mod normalize;
pub mod parse;

/// Outcome of the parse + normalize stages, shown to the user for review
#[derive(Debug, Serialize)]
pub struct ImportPreview {
    /// Records that passed the accept filter, in source order
    pub accepted: Vec<ImportedContact>,
    /// Total rows parsed from the file (accepted + silently dropped)
    pub total_rows: usize,
}

/// Run the pipeline up to the review step
pub fn preview(file_name: &str, data: &[u8]) -> Result<ImportPreview> {
    let format = format::sniff(file_name)?;
    let rows = parse::parse(format, data)?;
    let total_rows = rows.len();
    let accepted = normalize::normalize(rows);
    Ok(ImportPreview { accepted, total_rows })
}

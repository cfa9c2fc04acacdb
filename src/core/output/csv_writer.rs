//! CSV and TSV output writers.
//!
//! The header is taken from the first record's keys, in insertion order.
//! Every later record must carry exactly those keys; nothing is padded.
//!
//! The writer shape carries no logger, so header and row progress go to
//! the `log` facade at debug level.

use std::io::Write;

use crate::config::WriteOptions;
use crate::error::{ExportError, Result};
use crate::payload::{Payload, Record, cell_text};

/// Writes the payload as delimited text.
///
/// # Format
/// - Delimiter: `options.delimiter` (`,` by default)
/// - Header: first record's keys, unless `options.headers` is off
/// - Quoting: minimal, values containing the delimiter are quoted
/// - Cells: strings bare, `null` empty, nested values as compact JSON
pub fn write_csv(payload: &Payload, out: &mut dyn Write, options: &WriteOptions) -> Result<()> {
    let Some(columns) = payload.columns().filter(|columns| !columns.is_empty()) else {
        return Ok(());
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(out);

    if options.headers {
        writer.write_record(&columns)?;
        log::debug!("Wrote header with {} field(s).", columns.len());
    }

    for (index, record) in payload.iter().enumerate() {
        let row = build_row(index, record, &columns)?;
        writer.write_record(&row)?;
        log::debug!("Wrote row {}: {:?}", index + 1, row);
    }

    writer.flush()?;
    Ok(())
}

/// Writes the payload as tab-separated text.
///
/// Identical to [`write_csv`] with the delimiter fixed to a tab.
pub fn write_tsv(payload: &Payload, out: &mut dyn Write, options: &WriteOptions) -> Result<()> {
    write_csv(payload, out, &options.clone().with_delimiter(b'\t'))
}

/// Converts the payload to a CSV string.
pub fn to_csv(payload: &Payload, options: &WriteOptions) -> Result<String> {
    let mut buffer: Vec<u8> = Vec::new();
    write_csv(payload, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Converts the payload to a TSV string.
pub fn to_tsv(payload: &Payload, options: &WriteOptions) -> Result<String> {
    let mut buffer: Vec<u8> = Vec::new();
    write_tsv(payload, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Build one row, checking the record against the header.
fn build_row(index: usize, record: &Record, columns: &[&str]) -> Result<Vec<String>> {
    if let Some(extra) = record.keys().find(|key| !columns.contains(&key.as_str())) {
        return Err(ExportError::malformed(
            index,
            format!("unexpected column '{extra}'"),
        ));
    }

    columns
        .iter()
        .map(|column| {
            record
                .get(*column)
                .map(cell_text)
                .ok_or_else(|| ExportError::malformed(index, format!("missing column '{column}'")))
        })
        .collect()
}

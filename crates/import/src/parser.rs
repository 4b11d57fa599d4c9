// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sheet parsing.
//!
//! Turns uploaded bytes into header-keyed raw rows. Any structural problem
//! (unreadable encoding, broken quoting, ragged rows, no header) is fatal
//! and aborts the import before validation. Separator-only lines inside the
//! data are kept as empty rows; only trailing ones are dropped.

use csv::StringRecord;
use tracing::debug;

use crate::error::ImportError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One data row as parsed, before mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// The row index (0-based, header excluded).
    pub row_index: usize,
    /// `(header, value)` pairs in column order.
    pub cells: Vec<(String, String)>,
}

impl RawRow {
    /// Creates a raw row from `(header, value)` pairs.
    #[must_use]
    pub fn new<H: Into<String>, V: Into<String>>(
        row_index: usize,
        cells: impl IntoIterator<Item = (H, V)>,
    ) -> Self {
        Self {
            row_index,
            cells: cells
                .into_iter()
                .map(|(h, v)| (h.into(), v.into()))
                .collect(),
        }
    }
}

/// The result of parsing one input file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSheet {
    /// The header row, as written.
    pub headers: Vec<String>,
    /// The data rows, in file order.
    pub rows: Vec<RawRow>,
}

/// Parses an uploaded file into raw rows.
pub trait RowParser {
    /// Parses `input`, calling `on_row` with the running row count after
    /// each data row.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidCsvFormat` if the input is unreadable.
    fn parse(
        &self,
        input: &[u8],
        on_row: &mut dyn FnMut(usize),
    ) -> Result<ParsedSheet, ImportError>;
}

/// Delimited-text parser backed by the `csv` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvRowParser {
    delimiter: u8,
}

impl Default for CsvRowParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvRowParser {
    /// Creates a parser using `delimiter` between cells.
    #[must_use]
    pub const fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl RowParser for CsvRowParser {
    fn parse(
        &self,
        input: &[u8],
        on_row: &mut dyn FnMut(usize),
    ) -> Result<ParsedSheet, ImportError> {
        let content: &[u8] = input.strip_prefix(UTF8_BOM).unwrap_or(input);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .delimiter(self.delimiter)
            .from_reader(content);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::InvalidCsvFormat {
                reason: format!("Failed to read CSV headers: {e}"),
            })?
            .iter()
            .map(String::from)
            .collect();

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::InvalidCsvFormat {
                reason: String::from("The file has no header row"),
            });
        }

        let mut rows: Vec<RawRow> = Vec::new();
        // Separator-only lines held back until a non-blank line follows
        let mut pending_blank: Vec<StringRecord> = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let record: StringRecord = result.map_err(|e| ImportError::InvalidCsvFormat {
                reason: format!("Failed to read data line {}: {e}", idx + 1),
            })?;

            // Spreadsheet exports often pad the end with separator-only lines
            if record.iter().all(|cell| cell.trim().is_empty()) {
                pending_blank.push(record);
                continue;
            }

            for blank in pending_blank.drain(..) {
                push_row(&mut rows, &headers, &blank, on_row);
            }
            push_row(&mut rows, &headers, &record, on_row);
        }

        if !pending_blank.is_empty() {
            debug!("Dropped {} trailing blank lines", pending_blank.len());
        }

        debug!(
            "Parsed {} data rows with {} columns",
            rows.len(),
            headers.len()
        );

        Ok(ParsedSheet { headers, rows })
    }
}

fn push_row(
    rows: &mut Vec<RawRow>,
    headers: &[String],
    record: &StringRecord,
    on_row: &mut dyn FnMut(usize),
) {
    let row_index: usize = rows.len();
    rows.push(RawRow::new(
        row_index,
        headers.iter().cloned().zip(record.iter().map(String::from)),
    ));
    on_row(rows.len());
}

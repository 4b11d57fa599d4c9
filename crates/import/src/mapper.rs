// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Maps raw rows onto candidate records.

use grua_domain::{CandidateRecord, Field, ValidationWarning};

use crate::parser::RawRow;

/// Warning message for a header that maps to no field.
pub const MSG_UNKNOWN_COLUMN: &str = "Columna desconocida ignorada";

/// Normalizes a header for case-insensitive, whitespace-tolerant matching.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Finds the field a header names, if any.
#[must_use]
pub fn field_for_header(header: &str) -> Option<Field> {
    let normalized: String = normalize_header(header);
    Field::ALL
        .into_iter()
        .find(|field| field.matches_header(&normalized))
}

/// Maps one raw row.
///
/// Values are trimmed and otherwise copied as entered. Missing columns
/// leave the field empty, or set its default when it has one. If two
/// columns name the same field, the first non-blank one wins.
#[must_use]
pub fn map_row(raw: &RawRow) -> CandidateRecord {
    let mut record: CandidateRecord = CandidateRecord::default();

    for field in Field::ALL {
        let value: Option<&str> = raw
            .cells
            .iter()
            .filter(|(header, _)| field_for_header(header) == Some(field))
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty());

        match (value, field.default_value()) {
            (Some(v), _) => record.set(field, v.to_string()),
            (None, Some(default)) => record.set(field, default.to_string()),
            (None, None) => {}
        }
    }

    record
}

/// Maps every raw row, preserving order.
#[must_use]
pub fn map_rows(raw_rows: &[RawRow]) -> Vec<CandidateRecord> {
    raw_rows.iter().map(map_row).collect()
}

/// Returns the non-blank headers that name no field.
#[must_use]
pub fn unknown_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| !h.trim().is_empty() && field_for_header(h).is_none())
        .cloned()
        .collect()
}

/// Builds sheet-level warnings for unknown headers.
#[must_use]
pub fn unknown_header_warnings(headers: &[String]) -> Vec<ValidationWarning> {
    unknown_headers(headers)
        .into_iter()
        .map(|header| ValidationWarning {
            row_index: None,
            field: header.clone(),
            message: MSG_UNKNOWN_COLUMN.to_string(),
            value: header,
        })
        .collect()
}

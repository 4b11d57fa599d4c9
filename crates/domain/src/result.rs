// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{CandidateRecord, Field, IndexedRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single rule failure on one field of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The row index (0-based, header excluded).
    pub row_index: usize,
    /// The offending field.
    pub field: Field,
    /// A human-readable description of the failure.
    pub message: String,
    /// The value as entered.
    pub value: String,
}

impl ValidationError {
    /// Creates a validation error.
    #[must_use]
    pub fn new(row_index: usize, field: Field, message: &str, value: &str) -> Self {
        Self {
            row_index,
            field,
            message: message.to_string(),
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fila {}, {}: {} ('{}')",
            self.row_index + 1,
            self.field,
            self.message,
            self.value
        )
    }
}

/// A non-blocking notice. Warnings never affect row validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// The row index, or `None` for sheet-level notices.
    pub row_index: Option<usize>,
    /// The column the notice refers to.
    pub field: String,
    /// A human-readable description.
    pub message: String,
    /// The value involved.
    pub value: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row_index {
            Some(idx) => write!(
                f,
                "Fila {}, {}: {} ('{}')",
                idx + 1,
                self.field,
                self.message,
                self.value
            ),
            None => write!(f, "{}: {} ('{}')", self.field, self.message, self.value),
        }
    }
}

/// The outcome of validating one import batch.
///
/// Every row index in `0..total_rows` is either in `valid_rows` or has at
/// least one entry in `errors`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` if no row has errors.
    pub is_valid: bool,
    /// All errors, ordered by row index, rule order preserved within a row.
    pub errors: Vec<ValidationError>,
    /// All warnings.
    pub warnings: Vec<ValidationWarning>,
    /// Rows with zero errors, in source order.
    pub valid_rows: Vec<IndexedRecord>,
    /// Number of rows in the batch.
    pub total_rows: usize,
    /// Number of rows with zero errors.
    pub valid_count: usize,
    /// Number of distinct rows with at least one error.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
}

impl ValidationResult {
    /// Partitions `records` by the rows referenced in `errors`.
    ///
    /// `records[i]` is row `i`. The error list is stably sorted by row index.
    #[must_use]
    pub fn partition(
        records: Vec<CandidateRecord>,
        mut errors: Vec<ValidationError>,
        warnings: Vec<ValidationWarning>,
    ) -> Self {
        errors.sort_by_key(|e| e.row_index);

        let rejected: BTreeSet<usize> = errors.iter().map(|e| e.row_index).collect();
        let total_rows: usize = records.len();

        let valid_rows: Vec<IndexedRecord> = records
            .into_iter()
            .enumerate()
            .filter(|(row_index, _)| !rejected.contains(row_index))
            .map(|(row_index, record)| IndexedRecord { row_index, record })
            .collect();

        let valid_count: usize = valid_rows.len();
        let warning_count: usize = warnings.len();

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            valid_rows,
            total_rows,
            valid_count,
            error_count: rejected.len(),
            warning_count,
        }
    }

    /// Returns the errors attached to `row_index`, in rule order.
    pub fn errors_for_row(&self, row_index: usize) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.row_index == row_index)
    }

    /// Returns the distinct row indices that have errors, ascending.
    #[must_use]
    pub fn rejected_rows(&self) -> Vec<usize> {
        let rows: BTreeSet<usize> = self.errors.iter().map(|e| e.row_index).collect();
        rows.into_iter().collect()
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grua_domain::ValidationResult;
use serde::{Deserialize, Serialize};

/// A row the creation collaborator refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFailure {
    /// The row index in the source sheet.
    pub row_index: usize,
    /// The row's folio.
    pub folio: String,
    /// The collaborator's error message.
    pub error: String,
}

/// Terminal outcome of the submission stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// `true` if no submission failed and the run was not cancelled.
    pub success: bool,
    /// Rows created.
    pub processed: usize,
    /// Rows that failed.
    pub errors: usize,
    /// Human-readable summary.
    pub message: String,
    /// Per-row failure details, in submission order.
    pub failures: Vec<SubmissionFailure>,
    /// `true` if the run stopped before every valid row was attempted.
    pub cancelled: bool,
}

impl UploadResult {
    /// Builds the result from the submission counters.
    #[must_use]
    pub fn from_counts(
        processed: usize,
        failures: Vec<SubmissionFailure>,
        cancelled: bool,
    ) -> Self {
        let errors: usize = failures.len();
        let message: String = if cancelled {
            format!(
                "Importación cancelada: {processed} registros creados, {errors} con error"
            )
        } else {
            format!(
                "Importación finalizada: {processed} registros creados, {errors} con error"
            )
        };

        Self {
            success: errors == 0 && !cancelled,
            processed,
            errors,
            message,
            failures,
            cancelled,
        }
    }

    /// The result of a run with nothing to submit.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_counts(0, Vec::new(), false)
    }
}

/// Everything an import run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Per-row validation findings.
    pub validation: ValidationResult,
    /// Submission counters.
    pub upload: UploadResult,
}

impl ImportOutcome {
    /// `true` if every row validated and every valid row was created.
    #[must_use]
    pub const fn is_complete_success(&self) -> bool {
        self.validation.is_valid && self.upload.success
    }
}

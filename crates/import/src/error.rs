// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the import boundary.

use crate::stage::ImportStage;
use thiserror::Error;

/// Fatal import errors.
///
/// Row-level validation and submission failures are not represented here;
/// they are accumulated in the validation and upload results.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The input could not be read as a sheet.
    #[error("Invalid CSV format: {reason}")]
    InvalidCsvFormat { reason: String },

    /// The template could not be written.
    #[error("Failed to write template: {reason}")]
    TemplateWrite { reason: String },

    /// The run attempted to move backwards through its stages.
    #[error("Invalid import stage transition from {from} to {to}")]
    InvalidStageTransition { from: ImportStage, to: ImportStage },
}

/// Failure reported by a [`crate::RecordCreator`] for a single record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateError {
    /// The store refused the record.
    #[error("Record rejected: {0}")]
    Rejected(String),

    /// The store could not be reached or the write failed.
    #[error("Transport failure: {0}")]
    Transport(String),
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod creator;
mod error;
mod mapper;
mod orchestrator;
mod outcome;
mod parser;
mod progress;
mod queue;
mod stage;
mod template;

#[cfg(test)]
mod tests;

pub use config::{ImportConfig, RetryPolicy};
pub use creator::RecordCreator;
pub use error::{CreateError, ImportError};
pub use mapper::{
    MSG_UNKNOWN_COLUMN, field_for_header, map_row, map_rows, normalize_header, unknown_headers,
};
pub use orchestrator::{ImportOrchestrator, validate_batch};
pub use outcome::{ImportOutcome, SubmissionFailure, UploadResult};
pub use parser::{CsvRowParser, ParsedSheet, RawRow, RowParser};
pub use progress::{NoProgress, ProgressEvent, ProgressObserver};
pub use queue::{SubmissionQueue, SubmissionWorker};
pub use stage::ImportStage;
pub use template::{template_headers, template_string, write_template};

// Callers build snapshots and inspect results through these
pub use grua_domain::{
    CandidateRecord, ClientRef, CraneRef, IndexedRecord, OperatorRef, ReferenceSnapshots,
    ValidationError, ValidationResult, ValidationWarning,
};
pub use tokio_util::sync::CancellationToken;

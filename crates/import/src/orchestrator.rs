// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end import runs.
//!
//! A run parses the input, maps and validates every row, and submits the
//! valid ones serially. Stages only move forward; a structural parse error
//! is the only fatal outcome. Validation and submission failures are
//! reported in the returned [`ImportOutcome`].

use grua_domain::{
    CandidateRecord, ReferenceSnapshots, ValidationError, ValidationResult, ValidationWarning,
    collect_warnings, validate_references, validate_row, validate_unique_keys,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::creator::RecordCreator;
use crate::error::ImportError;
use crate::mapper::{map_rows, unknown_header_warnings};
use crate::outcome::{ImportOutcome, UploadResult};
use crate::parser::{CsvRowParser, ParsedSheet, RowParser};
use crate::progress::{ProgressEvent, ProgressObserver};
use crate::queue::{SubmissionQueue, SubmissionWorker};
use crate::stage::ImportStage;

/// Runs imports with a fixed configuration and parser.
#[derive(Debug, Clone)]
pub struct ImportOrchestrator<P: RowParser = CsvRowParser> {
    config: ImportConfig,
    parser: P,
    cancel: Option<CancellationToken>,
}

impl ImportOrchestrator<CsvRowParser> {
    /// Creates an orchestrator parsing delimited text per `config`.
    #[must_use]
    pub const fn new(config: ImportConfig) -> Self {
        Self {
            parser: CsvRowParser::new(config.delimiter),
            config,
            cancel: None,
        }
    }
}

impl<P: RowParser> ImportOrchestrator<P> {
    /// Creates an orchestrator using a custom parser.
    #[must_use]
    pub const fn with_parser(config: ImportConfig, parser: P) -> Self {
        Self {
            config,
            parser,
            cancel: None,
        }
    }

    /// Checks `token` between submissions and stops once it is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Parses and validates `input` without submitting anything.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidCsvFormat` if `input` cannot be parsed.
    pub fn validate_only<O: ProgressObserver + ?Sized>(
        &self,
        input: &[u8],
        existing_keys: &[String],
        snapshots: &ReferenceSnapshots<'_>,
        observer: &O,
    ) -> Result<ValidationResult, ImportError> {
        let mut stage: ImportStage = ImportStage::Idle;
        let validation: ValidationResult =
            self.parse_and_validate(&mut stage, input, existing_keys, snapshots, observer)?;
        stage = stage.advance(ImportStage::Done)?;
        info!("Import preview {}: {} rows", stage, validation.total_rows);
        Ok(validation)
    }

    /// Runs a full import.
    ///
    /// Valid rows are handed to `creator` one at a time in source order. A
    /// batch where no row is valid completes normally with nothing
    /// submitted.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidCsvFormat` if `input` cannot be parsed;
    /// no partial result is produced in that case.
    pub async fn run<C, O>(
        &self,
        input: &[u8],
        existing_keys: &[String],
        snapshots: &ReferenceSnapshots<'_>,
        creator: &C,
        observer: &O,
    ) -> Result<ImportOutcome, ImportError>
    where
        C: RecordCreator,
        O: ProgressObserver + ?Sized,
    {
        let mut stage: ImportStage = ImportStage::Idle;
        let validation: ValidationResult =
            self.parse_and_validate(&mut stage, input, existing_keys, snapshots, observer)?;

        stage = stage.advance(ImportStage::Uploading)?;
        info!(
            "Import {}: submitting {} of {} rows",
            stage, validation.valid_count, validation.total_rows
        );

        let upload: UploadResult = if validation.valid_rows.is_empty() {
            UploadResult::empty()
        } else {
            let mut queue: SubmissionQueue = SubmissionQueue::new(validation.valid_rows.clone());
            let mut worker: SubmissionWorker<'_, C> =
                SubmissionWorker::new(creator, self.config.retry);
            if let Some(token) = &self.cancel {
                worker = worker.with_cancellation(token);
            }
            worker.drain(&mut queue, observer).await
        };

        stage = stage.advance(ImportStage::Done)?;
        info!("Import {}: {}", stage, upload.message);

        Ok(ImportOutcome { validation, upload })
    }

    fn parse_and_validate<O: ProgressObserver + ?Sized>(
        &self,
        stage: &mut ImportStage,
        input: &[u8],
        existing_keys: &[String],
        snapshots: &ReferenceSnapshots<'_>,
        observer: &O,
    ) -> Result<ValidationResult, ImportError> {
        *stage = stage.advance(ImportStage::Parsing)?;
        info!("Import {}: reading {} bytes", stage, input.len());

        let interval: usize = self.config.progress_interval.max(1);
        let mut on_row = |count: usize| {
            if count % interval == 0 {
                observer.on_progress(ProgressEvent::new(ImportStage::Parsing, count, count));
            }
        };

        let sheet: ParsedSheet = match self.parser.parse(input, &mut on_row) {
            Ok(sheet) => sheet,
            Err(e) => {
                *stage = stage.advance(ImportStage::Failed)?;
                warn!("Import {}: {}", stage, e);
                return Err(e);
            }
        };
        let total: usize = sheet.rows.len();
        observer.on_progress(ProgressEvent::new(ImportStage::Parsing, total, total));

        *stage = stage.advance(ImportStage::Validating)?;
        info!("Import {}: {} rows", stage, total);
        observer.on_progress(ProgressEvent::new(ImportStage::Validating, 0, total));

        let validation: ValidationResult = validate_batch(&sheet, existing_keys, snapshots);

        observer.on_progress(ProgressEvent::new(ImportStage::Validating, total, total));
        info!(
            "Validation finished: {} valid, {} rejected, {} warnings",
            validation.valid_count, validation.error_count, validation.warning_count
        );

        Ok(validation)
    }
}

/// Maps and validates a parsed sheet entirely in memory.
///
/// Field errors for each row come first, followed by reference and folio
/// errors; the final list is grouped by row.
#[must_use]
pub fn validate_batch(
    sheet: &ParsedSheet,
    existing_keys: &[String],
    snapshots: &ReferenceSnapshots<'_>,
) -> ValidationResult {
    let records: Vec<CandidateRecord> = map_rows(&sheet.rows);

    let mut errors: Vec<ValidationError> = Vec::new();
    let mut warnings: Vec<ValidationWarning> = unknown_header_warnings(&sheet.headers);

    for (row_index, record) in records.iter().enumerate() {
        errors.extend(validate_row(record, row_index));
        warnings.extend(collect_warnings(record, row_index));
    }
    errors.extend(validate_references(&records, snapshots));
    errors.extend(validate_unique_keys(&records, existing_keys));

    ValidationResult::partition(records, errors, warnings)
}

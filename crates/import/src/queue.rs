// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serial submission of validated rows.
//!
//! A [`SubmissionQueue`] holds the rows in source order and a single
//! [`SubmissionWorker`] pulls from it, awaiting each creation before
//! pulling the next. At most one creation is ever in flight.

use grua_domain::IndexedRecord;
use std::collections::VecDeque;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::creator::RecordCreator;
use crate::error::CreateError;
use crate::outcome::{SubmissionFailure, UploadResult};
use crate::progress::{ProgressEvent, ProgressObserver};
use crate::stage::ImportStage;

/// Rows waiting to be submitted, in source order.
#[derive(Debug, Clone, Default)]
pub struct SubmissionQueue {
    pending: VecDeque<IndexedRecord>,
    total: usize,
}

impl SubmissionQueue {
    /// Enqueues `rows`.
    #[must_use]
    pub fn new(rows: Vec<IndexedRecord>) -> Self {
        let total: usize = rows.len();
        Self {
            pending: rows.into(),
            total,
        }
    }

    /// Takes the next row.
    pub fn pull(&mut self) -> Option<IndexedRecord> {
        self.pending.pop_front()
    }

    /// Rows still waiting.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Rows originally enqueued.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// The single consumer of a [`SubmissionQueue`].
pub struct SubmissionWorker<'a, C: RecordCreator> {
    creator: &'a C,
    retry: RetryPolicy,
    cancel: Option<&'a CancellationToken>,
}

impl<'a, C: RecordCreator> SubmissionWorker<'a, C> {
    /// Creates a worker submitting through `creator`.
    #[must_use]
    pub const fn new(creator: &'a C, retry: RetryPolicy) -> Self {
        Self {
            creator,
            retry,
            cancel: None,
        }
    }

    /// Stops pulling rows once `token` is cancelled.
    #[must_use]
    pub const fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancellationToken::is_cancelled)
    }

    /// Drains `queue`, reporting progress after every row.
    ///
    /// A failed row is recorded and the worker moves on; only cancellation
    /// stops it early.
    pub async fn drain<O: ProgressObserver + ?Sized>(
        &self,
        queue: &mut SubmissionQueue,
        observer: &O,
    ) -> UploadResult {
        let total: usize = queue.total();
        let mut processed: usize = 0;
        let mut failures: Vec<SubmissionFailure> = Vec::new();
        let mut cancelled: bool = false;

        observer.on_progress(ProgressEvent::new(ImportStage::Uploading, 0, total));

        while !queue.is_empty() {
            if self.is_cancelled() {
                warn!(
                    "Import cancelled with {} rows not submitted",
                    queue.remaining()
                );
                cancelled = true;
                break;
            }

            let Some(row) = queue.pull() else {
                break;
            };

            match self.submit(&row).await {
                Ok(id) => {
                    debug!(
                        "Created row {} (folio {}) as {}",
                        row.row_index + 1,
                        row.record.folio,
                        id
                    );
                    processed += 1;
                }
                Err(e) => {
                    warn!(
                        "Failed to create row {} (folio {}): {}",
                        row.row_index + 1,
                        row.record.folio,
                        e
                    );
                    failures.push(SubmissionFailure {
                        row_index: row.row_index,
                        folio: row.record.folio.clone(),
                        error: e.to_string(),
                    });
                }
            }

            observer.on_progress(ProgressEvent::new(
                ImportStage::Uploading,
                processed + failures.len(),
                total,
            ));
        }

        UploadResult::from_counts(processed, failures, cancelled)
    }

    async fn submit(&self, row: &IndexedRecord) -> Result<String, CreateError> {
        let attempts: u32 = self.retry.attempts();
        let mut attempt: u32 = 1;

        loop {
            match self.creator.create(&row.record).await {
                Ok(id) => return Ok(id),
                Err(e) if attempt < attempts && !self.is_cancelled() => {
                    debug!(
                        "Attempt {}/{} for folio {} failed: {}",
                        attempt, attempts, row.record.folio, e
                    );
                    attempt += 1;
                    if !self.retry.backoff.is_zero() {
                        tokio::time::sleep(self.retry.backoff).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Progress reporting.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::stage::ImportStage;

/// A progress checkpoint.
///
/// While parsing, the total is not known ahead of time, so `total` equals
/// the rows read so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// The stage reporting progress.
    pub stage: ImportStage,
    /// Items handled so far.
    pub processed: usize,
    /// Items in the stage.
    pub total: usize,
}

impl ProgressEvent {
    /// Creates a progress event.
    #[must_use]
    pub const fn new(stage: ImportStage, processed: usize, total: usize) -> Self {
        Self {
            stage,
            processed,
            total,
        }
    }
}

/// Receives progress events from an import run.
///
/// Called synchronously from the run; implementations must not block.
pub trait ProgressObserver {
    /// Handles one event.
    fn on_progress(&self, event: ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _event: ProgressEvent) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressEvent),
{
    fn on_progress(&self, event: ProgressEvent) {
        self(event);
    }
}

impl ProgressObserver for UnboundedSender<ProgressEvent> {
    fn on_progress(&self, event: ProgressEvent) {
        // A dropped receiver only means nobody is listening
        let _ = self.send(event);
    }
}

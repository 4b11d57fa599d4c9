// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

use grua_domain::{CandidateRecord, IndexedRecord};
use tokio_util::sync::CancellationToken;

use super::helpers::{EventLog, RecordingCreator};
use crate::{
    ImportStage, NoProgress, ProgressEvent, RetryPolicy, SubmissionQueue, SubmissionWorker,
    UploadResult,
};

fn indexed(folios: &[&str]) -> Vec<IndexedRecord> {
    folios
        .iter()
        .enumerate()
        .map(|(row_index, folio)| IndexedRecord {
            row_index,
            record: CandidateRecord {
                folio: (*folio).to_string(),
                ..CandidateRecord::default()
            },
        })
        .collect()
}

#[test]
fn test_queue_pulls_in_order() {
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["a", "b"]));

    assert_eq!(queue.total(), 2);
    assert_eq!(queue.pull().map(|r| r.record.folio), Some(String::from("a")));
    assert_eq!(queue.remaining(), 1);
    assert_eq!(queue.pull().map(|r| r.record.folio), Some(String::from("b")));
    assert!(queue.is_empty());
    assert!(queue.pull().is_none());
    assert_eq!(queue.total(), 2);
}

#[tokio::test]
async fn test_worker_continues_after_failure() {
    let creator: RecordingCreator = RecordingCreator::failing_on(&["r2"]);
    let worker: SubmissionWorker<'_, RecordingCreator> =
        SubmissionWorker::new(&creator, RetryPolicy::no_retry());
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["r1", "r2", "r3"]));

    let result: UploadResult = worker.drain(&mut queue, &NoProgress).await;

    assert_eq!(result.processed, 2);
    assert_eq!(result.errors, 1);
    assert!(!result.success);
    assert_eq!(creator.calls(), vec!["r1", "r2", "r3"]);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].folio, "r2");
    assert_eq!(result.failures[0].row_index, 1);
    assert!(result.failures[0].error.contains("refused"));
    assert_eq!(
        result.message,
        "Importación finalizada: 2 registros creados, 1 con error"
    );
}

#[tokio::test]
async fn test_worker_keeps_one_submission_in_flight() {
    let creator: RecordingCreator = RecordingCreator::new();
    let worker: SubmissionWorker<'_, RecordingCreator> =
        SubmissionWorker::new(&creator, RetryPolicy::no_retry());
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["1", "2", "3", "4", "5"]));

    let result: UploadResult = worker.drain(&mut queue, &NoProgress).await;

    assert!(result.success);
    assert_eq!(result.processed, 5);
    assert_eq!(creator.max_in_flight(), 1);
}

#[tokio::test]
async fn test_worker_reports_progress_after_every_row() {
    let creator: RecordingCreator = RecordingCreator::failing_on(&["b"]);
    let worker: SubmissionWorker<'_, RecordingCreator> =
        SubmissionWorker::new(&creator, RetryPolicy::no_retry());
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["a", "b", "c"]));
    let log: EventLog = EventLog::default();

    let _ = worker.drain(&mut queue, &log.observer()).await;

    let counts: Vec<(usize, usize)> = log
        .events()
        .iter()
        .inspect(|e| assert_eq!(e.stage, ImportStage::Uploading))
        .map(|e| (e.processed, e.total))
        .collect();
    assert_eq!(counts, vec![(0, 3), (1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn test_worker_retries_transient_failures() {
    let creator: RecordingCreator = RecordingCreator::flaky("x", 2);
    let retry: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        backoff: Duration::ZERO,
    };
    let worker: SubmissionWorker<'_, RecordingCreator> = SubmissionWorker::new(&creator, retry);
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["x"]));

    let result: UploadResult = worker.drain(&mut queue, &NoProgress).await;

    assert!(result.success);
    assert_eq!(result.processed, 1);
    assert_eq!(creator.calls(), vec!["x", "x", "x"]);
}

#[tokio::test]
async fn test_worker_gives_up_after_max_attempts() {
    let creator: RecordingCreator = RecordingCreator::flaky("x", 5);
    let retry: RetryPolicy = RetryPolicy {
        max_attempts: 2,
        backoff: Duration::ZERO,
    };
    let worker: SubmissionWorker<'_, RecordingCreator> = SubmissionWorker::new(&creator, retry);
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["x", "y"]));

    let result: UploadResult = worker.drain(&mut queue, &NoProgress).await;

    assert_eq!(result.processed, 1);
    assert_eq!(result.errors, 1);
    assert_eq!(creator.calls(), vec!["x", "x", "y"]);
}

#[tokio::test]
async fn test_worker_without_retry_attempts_once() {
    let creator: RecordingCreator = RecordingCreator::flaky("x", 1);
    let retry: RetryPolicy = RetryPolicy {
        max_attempts: 0,
        backoff: Duration::ZERO,
    };
    let worker: SubmissionWorker<'_, RecordingCreator> = SubmissionWorker::new(&creator, retry);
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["x"]));

    let result: UploadResult = worker.drain(&mut queue, &NoProgress).await;

    assert_eq!(result.errors, 1);
    assert_eq!(creator.calls(), vec!["x"]);
}

#[tokio::test]
async fn test_worker_stops_when_cancelled() {
    let token: CancellationToken = CancellationToken::new();
    let creator: RecordingCreator = RecordingCreator::cancelling_after(2, token.clone());
    let worker: SubmissionWorker<'_, RecordingCreator> =
        SubmissionWorker::new(&creator, RetryPolicy::no_retry()).with_cancellation(&token);
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["1", "2", "3", "4"]));

    let result: UploadResult = worker.drain(&mut queue, &NoProgress).await;

    assert!(result.cancelled);
    assert!(!result.success);
    assert_eq!(result.processed, 2);
    assert_eq!(result.errors, 0);
    assert_eq!(creator.calls(), vec!["1", "2"]);
    assert_eq!(queue.remaining(), 2);
    assert!(result.message.starts_with("Importación cancelada"));
}

#[tokio::test]
async fn test_progress_over_channel() {
    let creator: RecordingCreator = RecordingCreator::new();
    let worker: SubmissionWorker<'_, RecordingCreator> =
        SubmissionWorker::new(&creator, RetryPolicy::no_retry());
    let mut queue: SubmissionQueue = SubmissionQueue::new(indexed(&["1", "2"]));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ProgressEvent>();

    let _ = worker.drain(&mut queue, &tx).await;
    drop(tx);

    let mut received: Vec<ProgressEvent> = Vec::new();
    while let Some(event) = rx.recv().await {
        received.push(event);
    }
    assert_eq!(received.len(), 3);
    assert_eq!(
        received.last(),
        Some(&ProgressEvent::new(ImportStage::Uploading, 2, 2))
    );
}

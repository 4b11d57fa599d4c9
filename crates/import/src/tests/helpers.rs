// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use grua_domain::{CandidateRecord, ClientRef, CraneRef, OperatorRef};
use tokio_util::sync::CancellationToken;

use crate::{CreateError, ProgressEvent, RecordCreator};

pub const HEADER: &str =
    "folio,fecha_servicio,rut_cliente,patente_grua,rut_operador,origen,destino,valor";

/// A CSV data line that passes every check against the test snapshots.
pub fn valid_line(folio: &str) -> String {
    format!("{folio},2024-03-15,76.123.456-7,ABCD-12,12.345.678-9,Santiago,Valparaíso,150000")
}

pub fn csv_with_lines(lines: &[String]) -> String {
    let mut csv: String = String::from(HEADER);
    for line in lines {
        csv.push('\n');
        csv.push_str(line);
    }
    csv.push('\n');
    csv
}

pub fn create_test_clients() -> Vec<ClientRef> {
    vec![ClientRef {
        rut: String::from("76.123.456-7"),
        name: String::from("Transportes del Sur"),
    }]
}

pub fn create_test_cranes() -> Vec<CraneRef> {
    vec![CraneRef {
        plate: String::from("ABCD-12"),
        name: String::from("Grúa 1"),
    }]
}

pub fn create_test_operators() -> Vec<OperatorRef> {
    vec![OperatorRef {
        rut: String::from("12.345.678-9"),
        name: String::from("Juan Pérez"),
    }]
}

/// Records every creation call and fails on demand.
#[derive(Default)]
pub struct RecordingCreator {
    calls: Mutex<Vec<String>>,
    fail_folios: HashSet<String>,
    transient_failures: Mutex<HashMap<String, u32>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl RecordingCreator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always rejects the given folios.
    pub fn failing_on(folios: &[&str]) -> Self {
        Self {
            fail_folios: folios.iter().map(|f| (*f).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Fails `folio` the first `times` attempts, then succeeds.
    pub fn flaky(folio: &str, times: u32) -> Self {
        let creator: Self = Self::default();
        creator
            .transient_failures
            .lock()
            .unwrap()
            .insert(folio.to_string(), times);
        creator
    }

    /// Cancels `token` once `calls` creations have been attempted.
    pub fn cancelling_after(calls: usize, token: CancellationToken) -> Self {
        Self {
            cancel_after: Some((calls, token)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl RecordCreator for RecordingCreator {
    async fn create(&self, record: &CandidateRecord) -> Result<String, CreateError> {
        let current: usize = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        tokio::task::yield_now().await;

        let call_count: usize = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(record.folio.clone());
            calls.len()
        };

        if let Some((after, token)) = &self.cancel_after
            && call_count >= *after
        {
            token.cancel();
        }

        let transient: bool = {
            let mut remaining = self.transient_failures.lock().unwrap();
            match remaining.get_mut(&record.folio) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    true
                }
                _ => false,
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if transient {
            return Err(CreateError::Transport(String::from("timeout")));
        }
        if self.fail_folios.contains(&record.folio) {
            return Err(CreateError::Rejected(format!(
                "folio {} refused",
                record.folio
            )));
        }
        Ok(format!("svc-{}", record.folio))
    }
}

/// Collects progress events for later assertions.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<ProgressEvent>>,
}

impl EventLog {
    pub fn observer(&self) -> impl Fn(ProgressEvent) + '_ {
        move |event: ProgressEvent| self.events.lock().unwrap().push(event)
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Foreign-reference and folio uniqueness checks.
//!
//! These checks compare candidate records against read-only snapshots of
//! existing entities fetched by the caller before validation starts. No I/O
//! happens here.

use crate::result::ValidationError;
use crate::types::{CandidateRecord, ClientRef, CraneRef, Field, NaturalKey, OperatorRef};
use std::collections::HashSet;

/// Message for a folio repeated within the batch.
pub const MSG_DUPLICATE_IN_FILE: &str = "Folio duplicado en el archivo";
/// Message for a folio that is already persisted.
pub const MSG_ALREADY_EXISTS: &str = "Folio ya existe en el sistema";

/// An entity type that a candidate record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceEntity {
    /// A billed client.
    Client,
    /// A crane.
    Crane,
    /// A crane operator.
    Operator,
}

impl ReferenceEntity {
    /// The field holding this reference.
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::Client => Field::ClientRut,
            Self::Crane => Field::CranePlate,
            Self::Operator => Field::OperatorRut,
        }
    }

    /// The message emitted when the reference has no match.
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::Client => "Cliente no encontrado en el sistema",
            Self::Crane => "Grúa no encontrada en el sistema",
            Self::Operator => "Operador no encontrado en el sistema",
        }
    }
}

/// Borrowed views of the existing entities for one import run.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSnapshots<'a> {
    /// Existing clients.
    pub clients: &'a [ClientRef],
    /// Existing cranes.
    pub cranes: &'a [CraneRef],
    /// Existing operators.
    pub operators: &'a [OperatorRef],
}

impl<'a> ReferenceSnapshots<'a> {
    /// Creates snapshot views.
    #[must_use]
    pub const fn new(
        clients: &'a [ClientRef],
        cranes: &'a [CraneRef],
        operators: &'a [OperatorRef],
    ) -> Self {
        Self {
            clients,
            cranes,
            operators,
        }
    }
}

/// Normalizes a natural key for comparison.
fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase()
}

fn key_set<T: NaturalKey>(items: &[T]) -> HashSet<String> {
    items
        .iter()
        .map(|item| normalize_key(item.natural_key()))
        .collect()
}

/// Checks every row's client, crane and operator reference.
///
/// Row `i` of `rows` is reported as row index `i`. Blank references are
/// skipped; the required-field rule reports them.
#[must_use]
pub fn validate_references(
    rows: &[CandidateRecord],
    snapshots: &ReferenceSnapshots<'_>,
) -> Vec<ValidationError> {
    let lookups: [(ReferenceEntity, HashSet<String>); 3] = [
        (ReferenceEntity::Client, key_set(snapshots.clients)),
        (ReferenceEntity::Crane, key_set(snapshots.cranes)),
        (ReferenceEntity::Operator, key_set(snapshots.operators)),
    ];

    let mut errors: Vec<ValidationError> = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        for (entity, known) in &lookups {
            let value: &str = row.value(entity.field());
            if value.trim().is_empty() {
                continue;
            }
            if !known.contains(&normalize_key(value)) {
                errors.push(ValidationError::new(
                    row_index,
                    entity.field(),
                    entity.not_found_message(),
                    value,
                ));
            }
        }
    }

    errors
}

/// Checks folio uniqueness within the batch and against persisted folios.
///
/// A single forward scan keeps a seen-set: the first occurrence of a
/// repeated folio is not flagged as a duplicate, only later ones are.
/// Folios found in `existing_keys` are flagged on every occurrence.
#[must_use]
pub fn validate_unique_keys(
    rows: &[CandidateRecord],
    existing_keys: &[String],
) -> Vec<ValidationError> {
    let existing: HashSet<&str> = existing_keys.iter().map(|k| k.trim()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut errors: Vec<ValidationError> = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        let folio: &str = row.folio.trim();
        if folio.is_empty() {
            continue;
        }

        if !seen.insert(folio) {
            errors.push(ValidationError::new(
                row_index,
                Field::Folio,
                MSG_DUPLICATE_IN_FILE,
                &row.folio,
            ));
        }

        if existing.contains(folio) {
            errors.push(ValidationError::new(
                row_index,
                Field::Folio,
                MSG_ALREADY_EXISTS,
                &row.folio,
            ));
        }
    }

    errors
}

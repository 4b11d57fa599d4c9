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

mod error;
mod references;
mod result;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use references::{
    MSG_ALREADY_EXISTS, MSG_DUPLICATE_IN_FILE, ReferenceEntity, ReferenceSnapshots,
    validate_references, validate_unique_keys,
};
pub use result::{ValidationError, ValidationResult, ValidationWarning};
pub use types::{CandidateRecord, ClientRef, CraneRef, Field, IndexedRecord, NaturalKey, OperatorRef};
pub use validation::{
    MSG_INVALID_DATE, MSG_INVALID_NUMBER, MSG_INVALID_PLATE, MSG_INVALID_RUT, MSG_REQUIRED,
    MSG_ZERO_AMOUNT, collect_warnings, is_non_negative_number, is_valid_plate, is_valid_rut,
    parse_date, validate_row,
};

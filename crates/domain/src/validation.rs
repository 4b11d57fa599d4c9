// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stateless per-field rules for candidate records.

use crate::error::DomainError;
use crate::result::{ValidationError, ValidationWarning};
use crate::types::{CandidateRecord, Field};
use regex::Regex;
use std::sync::LazyLock;
use time::Date;
use time::macros::format_description;

/// Message for a blank mandatory field.
pub const MSG_REQUIRED: &str = "Campo obligatorio faltante";
/// Message for a malformed or impossible date.
pub const MSG_INVALID_DATE: &str = "Formato de fecha inválido (se espera AAAA-MM-DD)";
/// Message for a malformed national identifier.
pub const MSG_INVALID_RUT: &str = "RUT inválido (formato esperado 12.345.678-9)";
/// Message for a malformed plate.
pub const MSG_INVALID_PLATE: &str = "Patente inválida (formato esperado AB-1234)";
/// Message for a negative or non-numeric value.
pub const MSG_INVALID_NUMBER: &str =
    "Valor numérico inválido (debe ser un número mayor o igual a 0)";
/// Warning for a zero service amount.
pub const MSG_ZERO_AMOUNT: &str = "Valor en cero";

#[allow(clippy::expect_used)]
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));

#[allow(clippy::expect_used)]
static RUT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{3}\.[0-9]{3}-[0-9kK]$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static PLATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}-[0-9]{2,4}$").expect("valid regex"));

/// Parses a strict `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateFormat` if the pattern does not match and
/// `DomainError::InvalidCalendarDate` if the date does not exist
/// (e.g. `2024-02-30`).
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    if !DATE_PATTERN.is_match(value) {
        return Err(DomainError::InvalidDateFormat(value.to_string()));
    }

    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidCalendarDate {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Returns `true` if `value` is a well-formed RUT (`12.345.678-9`, `K` allowed).
///
/// Only the format is checked; the modulo-11 check digit is not verified.
#[must_use]
pub fn is_valid_rut(value: &str) -> bool {
    RUT_PATTERN.is_match(value)
}

/// Returns `true` if `value`, upper-cased, is a well-formed plate.
#[must_use]
pub fn is_valid_plate(value: &str) -> bool {
    PLATE_PATTERN.is_match(&value.to_uppercase())
}

/// Returns `true` if `value` parses to a finite number `>= 0`.
#[must_use]
pub fn is_non_negative_number(value: &str) -> bool {
    value
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite() && n >= 0.0)
}

/// Runs every field rule against one row.
///
/// All rules are evaluated; a row with N failing rules yields N errors.
/// Errors are appended in a fixed order: required fields, dates,
/// identifiers, plates, numerics. Format rules skip blank values, which are
/// either reported by the required rule or optional.
#[must_use]
pub fn validate_row(row: &CandidateRecord, row_index: usize) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    for field in Field::REQUIRED {
        let value: &str = row.value(field);
        if value.trim().is_empty() {
            errors.push(ValidationError::new(row_index, field, MSG_REQUIRED, value));
        }
    }

    check_format(
        row,
        row_index,
        &Field::DATES,
        MSG_INVALID_DATE,
        |v| parse_date(v).is_ok(),
        &mut errors,
    );
    check_format(
        row,
        row_index,
        &Field::IDENTIFIERS,
        MSG_INVALID_RUT,
        is_valid_rut,
        &mut errors,
    );
    check_format(
        row,
        row_index,
        &Field::PLATES,
        MSG_INVALID_PLATE,
        is_valid_plate,
        &mut errors,
    );
    check_format(
        row,
        row_index,
        &Field::NUMERICS,
        MSG_INVALID_NUMBER,
        is_non_negative_number,
        &mut errors,
    );

    errors
}

fn check_format(
    row: &CandidateRecord,
    row_index: usize,
    fields: &[Field],
    message: &str,
    is_valid: impl Fn(&str) -> bool,
    errors: &mut Vec<ValidationError>,
) {
    for &field in fields {
        let value: &str = row.value(field);
        if value.trim().is_empty() {
            continue;
        }
        if !is_valid(value) {
            errors.push(ValidationError::new(row_index, field, message, value));
        }
    }
}

/// Collects non-blocking notices for one row.
#[must_use]
pub fn collect_warnings(row: &CandidateRecord, row_index: usize) -> Vec<ValidationWarning> {
    let mut warnings: Vec<ValidationWarning> = Vec::new();

    if row.amount.parse::<f64>().is_ok_and(|n| n.abs() < f64::EPSILON) {
        warnings.push(ValidationWarning {
            row_index: Some(row_index),
            field: Field::Amount.column_name().to_string(),
            message: MSG_ZERO_AMOUNT.to_string(),
            value: row.amount.clone(),
        });
    }

    warnings
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by domain value parsing.
///
/// Row-level validation failures are not errors in this sense; they are
/// collected as [`crate::ValidationError`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A column name does not correspond to any field.
    UnknownField(String),
    /// A date string does not match `YYYY-MM-DD`.
    InvalidDateFormat(String),
    /// A date string matches the pattern but is not a calendar date.
    InvalidCalendarDate {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "Unknown field: '{name}'"),
            Self::InvalidDateFormat(value) => {
                write!(f, "Date '{value}' does not match YYYY-MM-DD")
            }
            Self::InvalidCalendarDate { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Downloadable import template.

use grua_domain::Field;
use std::io::Write;

use crate::error::ImportError;

/// Example rows, in [`Field::ALL`] order. Both pass field validation.
const EXAMPLE_ROWS: [[&str; 13]; 2] = [
    [
        "1001",
        "2024-03-15",
        "76.123.456-7",
        "ABCD-12",
        "12.345.678-9",
        "Santiago",
        "Valparaíso",
        "150000",
        "10",
        "",
        "Traslado",
        "OC-501",
        "Vehículo liviano",
    ],
    [
        "1002",
        "2024-03-16",
        "77.654.321-K",
        "GH-4455",
        "15.222.333-4",
        "Rancagua",
        "Santiago",
        "98000.50",
        "12.5",
        "2024-04-01",
        "Rescate",
        "",
        "",
    ],
];

/// The template header row.
#[must_use]
pub fn template_headers() -> Vec<&'static str> {
    Field::ALL.iter().map(|f| f.column_name()).collect()
}

/// Writes the template as comma-separated text.
///
/// # Errors
///
/// Returns `ImportError::TemplateWrite` if `writer` fails.
pub fn write_template<W: Write>(writer: W, include_examples: bool) -> Result<(), ImportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(template_headers())
        .map_err(to_template_error)?;

    if include_examples {
        for row in &EXAMPLE_ROWS {
            csv_writer.write_record(row).map_err(to_template_error)?;
        }
    }

    csv_writer.flush().map_err(|e| ImportError::TemplateWrite {
        reason: e.to_string(),
    })
}

/// Renders the template to a string.
///
/// # Errors
///
/// Returns `ImportError::TemplateWrite` if rendering fails.
pub fn template_string(include_examples: bool) -> Result<String, ImportError> {
    let mut buffer: Vec<u8> = Vec::new();
    write_template(&mut buffer, include_examples)?;
    String::from_utf8(buffer).map_err(|e| ImportError::TemplateWrite {
        reason: e.to_string(),
    })
}

#[allow(clippy::needless_pass_by_value)]
fn to_template_error(err: csv::Error) -> ImportError {
    ImportError::TemplateWrite {
        reason: err.to_string(),
    }
}

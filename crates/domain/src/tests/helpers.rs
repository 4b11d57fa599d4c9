// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CandidateRecord, ClientRef, CraneRef, OperatorRef};

/// A record that passes every field rule and matches the test snapshots.
pub fn create_valid_record(folio: &str) -> CandidateRecord {
    CandidateRecord {
        folio: folio.to_string(),
        service_date: String::from("2024-03-15"),
        client_rut: String::from("76.123.456-7"),
        crane_plate: String::from("ABCD-12"),
        operator_rut: String::from("12.345.678-9"),
        origin: String::from("Santiago"),
        destination: String::from("Valparaíso"),
        amount: String::from("150000"),
        commission_pct: Some(String::from("10")),
        payment_date: None,
        service_type: Some(String::from("Traslado")),
        purchase_order: None,
        notes: None,
    }
}

pub fn create_test_clients() -> Vec<ClientRef> {
    vec![
        ClientRef {
            rut: String::from("76.123.456-7"),
            name: String::from("Transportes del Sur"),
        },
        ClientRef {
            rut: String::from("77.654.321-K"),
            name: String::from("Seguros Andes"),
        },
    ]
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

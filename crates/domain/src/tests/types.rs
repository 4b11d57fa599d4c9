// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CandidateRecord, DomainError, Field};
use std::collections::HashSet;

#[test]
fn test_field_column_names_are_unique() {
    let names: HashSet<&str> = Field::ALL.iter().map(|f| f.column_name()).collect();
    assert_eq!(names.len(), Field::ALL.len());
}

#[test]
fn test_field_from_str_round_trips_column_name() {
    for field in Field::ALL {
        let parsed: Field = field.column_name().parse().expect("known column");
        assert_eq!(parsed, field);
    }
}

#[test]
fn test_field_from_str_rejects_unknown_column() {
    let result: Result<Field, DomainError> = "color".parse();
    assert_eq!(result, Err(DomainError::UnknownField(String::from("color"))));
}

#[test]
fn test_field_matches_header_accepts_aliases() {
    assert!(Field::ClientRut.matches_header("rut_cliente"));
    assert!(Field::ClientRut.matches_header("cliente"));
    assert!(Field::CranePlate.matches_header("grúa"));
    assert!(!Field::ClientRut.matches_header("rut_operador"));
}

#[test]
fn test_required_fields() {
    assert!(Field::Folio.is_required());
    assert!(Field::Destination.is_required());
    assert!(!Field::Notes.is_required());
    assert!(!Field::PaymentDate.is_required());
}

#[test]
fn test_only_service_type_has_default() {
    let defaults: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|f| f.default_value().is_some())
        .collect();
    assert_eq!(defaults, vec![Field::ServiceType]);
}

#[test]
fn test_candidate_record_set_and_value() {
    let mut record: CandidateRecord = CandidateRecord::default();
    record.set(Field::Folio, String::from("42"));
    record.set(Field::Notes, String::from("urgente"));
    record.set(Field::PurchaseOrder, String::new());

    assert_eq!(record.value(Field::Folio), "42");
    assert_eq!(record.notes, Some(String::from("urgente")));
    assert_eq!(record.purchase_order, None);
    assert_eq!(record.value(Field::PurchaseOrder), "");
    assert_eq!(record.value(Field::Destination), "");
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A column of the service-order import sheet.
///
/// The declaration order is the canonical column order used by the
/// template export and by the required-field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Field {
    /// Human-facing unique service number.
    Folio,
    /// Date the tow service was performed.
    ServiceDate,
    /// National identifier (RUT) of the billed client.
    ClientRut,
    /// Registration plate of the crane that performed the service.
    CranePlate,
    /// National identifier (RUT) of the crane operator.
    OperatorRut,
    /// Pickup location.
    Origin,
    /// Drop-off location.
    Destination,
    /// Service amount.
    Amount,
    /// Operator commission percentage.
    CommissionPct,
    /// Date the service was paid.
    PaymentDate,
    /// Service type label.
    ServiceType,
    /// Client purchase order number.
    PurchaseOrder,
    /// Free-text notes.
    Notes,
}

impl Field {
    /// Every column, in canonical order.
    pub const ALL: [Self; 13] = [
        Self::Folio,
        Self::ServiceDate,
        Self::ClientRut,
        Self::CranePlate,
        Self::OperatorRut,
        Self::Origin,
        Self::Destination,
        Self::Amount,
        Self::CommissionPct,
        Self::PaymentDate,
        Self::ServiceType,
        Self::PurchaseOrder,
        Self::Notes,
    ];

    /// Columns that must carry a non-blank value.
    pub const REQUIRED: [Self; 8] = [
        Self::Folio,
        Self::ServiceDate,
        Self::ClientRut,
        Self::CranePlate,
        Self::OperatorRut,
        Self::Origin,
        Self::Destination,
        Self::Amount,
    ];

    /// Columns holding `YYYY-MM-DD` dates.
    pub const DATES: [Self; 2] = [Self::ServiceDate, Self::PaymentDate];

    /// Columns holding national identifiers.
    pub const IDENTIFIERS: [Self; 2] = [Self::ClientRut, Self::OperatorRut];

    /// Columns holding registration plates.
    pub const PLATES: [Self; 1] = [Self::CranePlate];

    /// Columns holding non-negative numbers.
    pub const NUMERICS: [Self; 2] = [Self::Amount, Self::CommissionPct];

    /// The canonical column header for this field.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Folio => "folio",
            Self::ServiceDate => "fecha_servicio",
            Self::ClientRut => "rut_cliente",
            Self::CranePlate => "patente_grua",
            Self::OperatorRut => "rut_operador",
            Self::Origin => "origen",
            Self::Destination => "destino",
            Self::Amount => "valor",
            Self::CommissionPct => "comision",
            Self::PaymentDate => "fecha_pago",
            Self::ServiceType => "tipo_servicio",
            Self::PurchaseOrder => "orden_compra",
            Self::Notes => "observaciones",
        }
    }

    /// Alternative headers accepted for this field, already normalized.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Folio => &["numero_folio", "n_folio"],
            Self::ServiceDate => &["fecha"],
            Self::ClientRut => &["cliente", "rut_del_cliente"],
            Self::CranePlate => &["grua", "grúa", "patente", "patente_grúa"],
            Self::OperatorRut => &["operador", "rut_del_operador"],
            Self::Origin => &["direccion_origen"],
            Self::Destination => &["direccion_destino"],
            Self::Amount => &["monto", "valor_servicio"],
            Self::CommissionPct => &["comision_operador", "comisión", "porcentaje_comision"],
            Self::PaymentDate => &[],
            Self::ServiceType => &["tipo"],
            Self::PurchaseOrder => &["oc"],
            Self::Notes => &["notas", "observacion"],
        }
    }

    /// Whether the field is mandatory.
    #[must_use]
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// The value assigned when the column is absent or blank.
    #[must_use]
    pub const fn default_value(self) -> Option<&'static str> {
        match self {
            Self::ServiceType => Some("Traslado"),
            _ => None,
        }
    }

    /// Returns `true` if `normalized_header` names this field.
    #[must_use]
    pub fn matches_header(self, normalized_header: &str) -> bool {
        self.column_name() == normalized_header || self.aliases().contains(&normalized_header)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column_name() == s)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.column_name().to_string()
    }
}

impl TryFrom<String> for Field {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A service order read from an import sheet, not yet persisted.
///
/// Values are kept exactly as entered (trimmed only) so validation
/// reports what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// The folio.
    pub folio: String,
    /// The service date.
    pub service_date: String,
    /// The client RUT.
    pub client_rut: String,
    /// The crane plate.
    pub crane_plate: String,
    /// The operator RUT.
    pub operator_rut: String,
    /// The pickup location.
    pub origin: String,
    /// The drop-off location.
    pub destination: String,
    /// The service amount.
    pub amount: String,
    /// The operator commission percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_pct: Option<String>,
    /// The payment date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    /// The service type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    /// The purchase order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order: Option<String>,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CandidateRecord {
    /// Returns the raw value of `field`, or `""` if it is absent.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Folio => &self.folio,
            Field::ServiceDate => &self.service_date,
            Field::ClientRut => &self.client_rut,
            Field::CranePlate => &self.crane_plate,
            Field::OperatorRut => &self.operator_rut,
            Field::Origin => &self.origin,
            Field::Destination => &self.destination,
            Field::Amount => &self.amount,
            Field::CommissionPct => self.commission_pct.as_deref().unwrap_or_default(),
            Field::PaymentDate => self.payment_date.as_deref().unwrap_or_default(),
            Field::ServiceType => self.service_type.as_deref().unwrap_or_default(),
            Field::PurchaseOrder => self.purchase_order.as_deref().unwrap_or_default(),
            Field::Notes => self.notes.as_deref().unwrap_or_default(),
        }
    }

    /// Sets `field` to `value`.
    ///
    /// Optional fields store `None` for an empty value.
    pub fn set(&mut self, field: Field, value: String) {
        let optional: Option<String> = if value.is_empty() {
            None
        } else {
            Some(value.clone())
        };

        match field {
            Field::Folio => self.folio = value,
            Field::ServiceDate => self.service_date = value,
            Field::ClientRut => self.client_rut = value,
            Field::CranePlate => self.crane_plate = value,
            Field::OperatorRut => self.operator_rut = value,
            Field::Origin => self.origin = value,
            Field::Destination => self.destination = value,
            Field::Amount => self.amount = value,
            Field::CommissionPct => self.commission_pct = optional,
            Field::PaymentDate => self.payment_date = optional,
            Field::ServiceType => self.service_type = optional,
            Field::PurchaseOrder => self.purchase_order = optional,
            Field::Notes => self.notes = optional,
        }
    }
}

/// A candidate record tagged with its 0-based position in the source sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedRecord {
    /// The row index (0-based, header excluded).
    pub row_index: usize,
    /// The record.
    pub record: CandidateRecord,
}

/// An existing client, keyed by RUT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRef {
    /// The client's RUT.
    pub rut: String,
    /// The client's business name.
    #[serde(default)]
    pub name: String,
}

/// An existing crane, keyed by registration plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraneRef {
    /// The crane's plate.
    pub plate: String,
    /// The crane's display name.
    #[serde(default)]
    pub name: String,
}

/// An existing operator, keyed by RUT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRef {
    /// The operator's RUT.
    pub rut: String,
    /// The operator's full name.
    #[serde(default)]
    pub name: String,
}

/// Something identified by a natural business key.
pub trait NaturalKey {
    /// Returns the natural key as stored.
    fn natural_key(&self) -> &str;
}

impl NaturalKey for ClientRef {
    fn natural_key(&self) -> &str {
        &self.rut
    }
}

impl NaturalKey for CraneRef {
    fn natural_key(&self) -> &str {
        &self.plate
    }
}

impl NaturalKey for OperatorRef {
    fn natural_key(&self) -> &str {
        &self.rut
    }
}

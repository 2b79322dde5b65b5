//! Field-level validation for the three request kinds.
//!
//! Validation is pure and synchronous: a loosely-typed draft (text fields as a
//! form submits them) either becomes a fully typed [`Detalle`] or a list of
//! [`FieldError`]s. Every offending field is reported; nothing short-circuits.

pub mod delivery;
pub mod envio_flex;
pub mod mensajeria;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub use delivery::{DeliveryDraft, validar_delivery};
pub use envio_flex::{EnvioFlexDraft, PuntoEntregaDraft, validar_envio_flex};
pub use mensajeria::{MensajeriaDraft, validar_mensajeria};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Numeric form input: forms post text, API clients may post numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumeroEntrada {
    Numero(f64),
    Texto(String),
}

pub(crate) fn requerir_texto(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &str,
    min: usize,
    message: &str,
) -> bool {
    if value.chars().count() < min {
        errors.push(FieldError::new(field, message));
        false
    } else {
        true
    }
}

/// Minimum length applies only when the field was actually filled in.
pub(crate) fn texto_opcional(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&str>,
    min: usize,
    message: &str,
) -> Option<String> {
    match value {
        Some(raw) if !raw.trim().is_empty() => {
            if raw.chars().count() < min {
                errors.push(FieldError::new(field, message));
                None
            } else {
                Some(raw.to_string())
            }
        }
        _ => None,
    }
}

/// Coerces an optional numeric input. Absent or blank is valid (`None`);
/// non-numeric or non-positive input is an error.
pub(crate) fn numero_positivo(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&NumeroEntrada>,
    message: &str,
) -> Option<f64> {
    let parsed = match value {
        None => return None,
        Some(NumeroEntrada::Numero(n)) => Some(*n),
        Some(NumeroEntrada::Texto(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            raw.parse::<f64>().ok()
        }
    };

    match parsed {
        Some(n) if n > 0.0 => Some(n),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// Local date-time string (`2025-06-01T14:30`) to an absolute timestamp.
pub(crate) fn fecha_local(
    errors: &mut Vec<FieldError>,
    field: &str,
    raw: &str,
    required_message: &str,
) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        errors.push(FieldError::new(field, required_message));
        return None;
    }

    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_utc())
        });

    match parsed {
        Ok(naive) => Some(naive.and_utc()),
        Err(_) => {
            errors.push(FieldError::new(field, "La fecha no tiene un formato válido."));
            None
        }
    }
}

//! # Validation Module
//!
//! Sale form validation for Merka POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sale Form Checks (in order)                        │
//! │                                                                         │
//! │  1. client name present AND ≥ 1 service selected                       │
//! │     └── "Falta nombre del cliente o servicios."                        │
//! │  2. barber name resolves to a listed barber                            │
//! │     └── "Error al identificar barbero."                                │
//! │  3. every selected service exists in the catalog                       │
//! │  4. tip is a finite, non-negative amount                               │
//! │  5. payment method is one of the three (blank → Efectivo)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  NewTicket (prices frozen from the catalog)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use merka_core::validation::{validate_sale, SaleForm};
//! use merka_core::{Barber, CommissionRate, Money, Role, Service};
//!
//! let barbers = vec![Barber { id: 1, name: "Juan".into(), role: Role::Barbero }];
//! let services = vec![Service {
//!     id: 1,
//!     name: "Corte Clásico".into(),
//!     price: Money::from_major(150),
//!     commission: CommissionRate::from_percentage(50.0),
//! }];
//!
//! let form = SaleForm {
//!     client: "Carlos".into(),
//!     barber: "Juan".into(),
//!     services: vec!["Corte Clásico".into()],
//!     tip: 10.0,
//!     ..SaleForm::default()
//! };
//!
//! let ticket = validate_sale(&form, &barbers, &services).unwrap();
//! assert_eq!(ticket.total().unwrap(), Money::from_major(160));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Barber, NewDetail, NewTicket, PaymentMethod, Service};
use crate::REPORT_DATE_FORMAT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Sale Form
// =============================================================================

/// Raw sale form as submitted by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct SaleForm {
    /// Client name.
    pub client: String,
    /// Optional WhatsApp contact.
    pub whatsapp: Option<String>,
    /// Barber name, as listed by the sale form.
    pub barber: String,
    /// Selected service names.
    pub services: Vec<String>,
    /// Tip amount in currency units.
    pub tip: f64,
    /// Payment method name, matched case-insensitively.
    pub payment_method: Option<String>,
}

/// Validates a sale form against the current catalog.
///
/// `barbers` is the list the form offered (Admins excluded), so a sale can
/// only be attributed to a barber the form could show.
pub fn validate_sale(
    form: &SaleForm,
    barbers: &[Barber],
    services: &[Service],
) -> CoreResult<NewTicket> {
    let client = form.client.trim();
    if client.is_empty() || form.services.is_empty() {
        return Err(ValidationError::MissingClientOrServices.into());
    }

    let barber = barbers
        .iter()
        .find(|b| b.name == form.barber)
        .ok_or_else(|| CoreError::BarberNotFound(form.barber.clone()))?;

    let lines = form
        .services
        .iter()
        .map(|name| {
            services
                .iter()
                .find(|s| &s.name == name)
                .map(NewDetail::from)
                .ok_or_else(|| ValidationError::UnknownService(name.clone()))
        })
        .collect::<ValidationResult<Vec<_>>>()?;

    let tip = validate_tip(form.tip)?;
    let payment_method = parse_payment_method(form.payment_method.as_deref())?;

    let ticket = NewTicket {
        client: client.to_string(),
        whatsapp: normalize_contact(form.whatsapp.as_deref()),
        barber_id: barber.id,
        tip,
        payment_method,
        lines,
    };
    ticket.total()?;
    Ok(ticket)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a tip amount.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is the default)
/// - Its cents must fit [`Money::MAX_DECIMAL_CENTS`]
///
/// ## Example
/// ```rust
/// use merka_core::validation::validate_tip;
///
/// assert_eq!(validate_tip(10.0).unwrap().cents(), 1000);
/// assert!(validate_tip(-1.0).is_err());
/// assert!(validate_tip(f64::NAN).is_err());
/// ```
pub fn validate_tip(tip: f64) -> ValidationResult<Money> {
    if !tip.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "tip".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    let tip = Money::try_from_decimal(tip).ok_or_else(|| ValidationError::InvalidFormat {
        field: "tip".to_string(),
        reason: "amount too large".to_string(),
    })?;
    if tip.is_negative() {
        return Err(ValidationError::Negative {
            field: "tip".to_string(),
        });
    }

    Ok(tip)
}

/// Resolves the submitted payment method; blank or absent means `Efectivo`.
pub fn parse_payment_method(raw: Option<&str>) -> ValidationResult<PaymentMethod> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.parse(),
        None => Ok(PaymentMethod::default()),
    }
}

/// Trims a contact handle; blank input means "no contact".
pub fn normalize_contact(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parses the report filter date (`YYYY-MM-DD`).
///
/// ## Example
/// ```rust
/// use merka_core::validation::parse_report_date;
///
/// assert!(parse_report_date("2026-10-16").is_ok());
/// assert!(parse_report_date("16/10/2026").is_err());
/// ```
pub fn parse_report_date(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), REPORT_DATE_FORMAT).map_err(|e| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: e.to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

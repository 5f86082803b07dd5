//! # Domain Types
//!
//! Core domain types used throughout Merka POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Service      │   │     Ticket      │   │     Detail      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  client         │   │  ticket_id (FK) │       │
//! │  │  price          │   │  barber_id (FK) │   │  service (name) │       │
//! │  │  commission     │   │  total, tip     │   │  price (frozen) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Barber      │   │      Role       │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name, role │   │  Barbero        │   │  Efectivo       │       │
//! │  └─────────────────┘   │  Admin          │   │  Tarjeta        │       │
//! │                        └─────────────────┘   │  Sinpe Móvil    │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `Detail` copies the service name and price at the time of sale. Later
//! catalog changes never rewrite historical tickets.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Commission Rate
// =============================================================================

/// Staff commission rate in basis points (bps).
///
/// 1 basis point = 0.01%, so 5000 bps = 50%. The legacy `comision` column
/// holds a plain percentage (`50`), converted with [`CommissionRate::from_percentage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionRate(u32);

impl CommissionRate {
    /// Creates a commission rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CommissionRate(bps)
    }

    /// Creates a commission rate from a percentage. Negative input clamps to zero.
    pub fn from_percentage(pct: f64) -> Self {
        CommissionRate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for storage and display).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Role
// =============================================================================

/// Staff role. `Admin` unlocks the owner monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum Role {
    /// Works the chair; can ring up sales.
    Barbero,
    /// Owner; can ring up sales and read the daily report.
    Admin,
}

impl Role {
    /// Stored/displayed name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Barbero => "Barbero",
            Role::Admin => "Admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the client paid. Stored verbatim in `tickets.metodo_pago`.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Cash.
    #[default]
    Efectivo,
    /// Card on an external terminal.
    Tarjeta,
    /// SINPE Móvil bank transfer.
    #[serde(rename = "Sinpe Móvil")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Sinpe Móvil"))]
    SinpeMovil,
}

impl PaymentMethod {
    /// Every method, in the order the sale form offers them.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Efectivo,
        PaymentMethod::Tarjeta,
        PaymentMethod::SinpeMovil,
    ];

    /// Stored/displayed name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "Efectivo",
            PaymentMethod::Tarjeta => "Tarjeta",
            PaymentMethod::SinpeMovil => "Sinpe Móvil",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "payment_method".to_string(),
                allowed: PaymentMethod::ALL
                    .iter()
                    .map(|m| m.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Service
// =============================================================================

/// A sellable offering (haircut, beard trim, retail product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Service {
    pub id: i64,
    /// Display name, also the key the sale form selects by.
    pub name: String,
    pub price: Money,
    /// Share of the price owed to the barber.
    pub commission: CommissionRate,
}

// =============================================================================
// Barber
// =============================================================================

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Barber {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

// =============================================================================
// Ticket
// =============================================================================

/// One completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ticket {
    pub id: i64,
    pub client: String,
    /// Client's WhatsApp handle, if given.
    pub whatsapp: Option<String>,
    pub barber_id: i64,
    /// Sum of detail prices plus tip.
    pub total: Money,
    pub tip: Money,
    /// Local wall-clock time of the sale.
    #[ts(as = "String")]
    pub created_at: NaiveDateTime,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Detail
// =============================================================================

/// A line item on a ticket, frozen at sale time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Detail {
    pub id: i64,
    pub ticket_id: i64,
    /// Service name at time of sale (frozen).
    pub service: String,
    /// Price at time of sale (frozen).
    pub price: Money,
}

// =============================================================================
// New Ticket (validated sale)
// =============================================================================

/// A detail line ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDetail {
    pub service: String,
    pub price: Money,
}

impl From<&Service> for NewDetail {
    fn from(service: &Service) -> Self {
        NewDetail {
            service: service.name.clone(),
            price: service.price,
        }
    }
}

/// A sale that passed validation and is ready to be persisted.
///
/// Built by [`crate::validation::validate_sale`]; holds everything the
/// ticket transaction needs except the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    pub client: String,
    pub whatsapp: Option<String>,
    pub barber_id: i64,
    pub tip: Money,
    pub payment_method: PaymentMethod,
    pub lines: Vec<NewDetail>,
}

impl NewTicket {
    /// The total the ticket row ends up with.
    pub fn total(&self) -> Result<Money, crate::error::ValidationError> {
        crate::ticket_total(self.lines.iter().map(|l| l.price), self.tip)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_rate_from_percentage() {
        let rate = CommissionRate::from_percentage(60.0);
        assert_eq!(rate.bps(), 6000);
        assert!((rate.percentage() - 60.0).abs() < f64::EPSILON);
        assert_eq!(CommissionRate::from_percentage(-5.0).bps(), 0);
        assert_eq!(CommissionRate::default(), CommissionRate::from_bps(0));
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("Efectivo".parse::<PaymentMethod>().unwrap(), PaymentMethod::Efectivo);
        assert_eq!("tarjeta".parse::<PaymentMethod>().unwrap(), PaymentMethod::Tarjeta);
        assert_eq!(
            "Sinpe Móvil".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::SinpeMovil
        );
        assert!("Bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serializes_stored_name() {
        let json = serde_json::to_string(&PaymentMethod::SinpeMovil).unwrap();
        assert_eq!(json, "\"Sinpe Móvil\"");
        assert_eq!(PaymentMethod::default(), PaymentMethod::Efectivo);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert_eq!(serde_json::to_string(&Role::Barbero).unwrap(), "\"Barbero\"");
        assert!(Role::Admin.is_admin());
        assert!(!Role::Barbero.is_admin());
    }

    #[test]
    fn test_new_ticket_total() {
        let ticket = NewTicket {
            client: "Carlos".to_string(),
            whatsapp: None,
            barber_id: 1,
            tip: Money::from_major(20),
            payment_method: PaymentMethod::Efectivo,
            lines: vec![
                NewDetail {
                    service: "Corte Clásico".to_string(),
                    price: Money::from_major(150),
                },
                NewDetail {
                    service: "Barba Express".to_string(),
                    price: Money::from_major(100),
                },
            ],
        };
        assert_eq!(ticket.total().unwrap(), Money::from_major(270));
    }
}

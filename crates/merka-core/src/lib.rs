//! # merka-core: Pure Business Logic for Merka POS
//!
//! This crate holds the barbershop's business rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Merka POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP client (browser / tablet)               │   │
//! │  │        Login ──► Nueva Venta ──► Monitor Dueño                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum routes)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ merka-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   types · money · validation · auth · session · report          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    merka-db (Database Layer)                    │   │
//! │  │           SQLite schema, seeds, repositories                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Service, Barber, Ticket, Detail, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Sale form validation
//! - [`auth`] - Hardcoded credential check
//! - [`session`] - Per-session login/role/view state
//! - [`report`] - Daily sales report aggregation
//!
//! ## Example Usage
//!
//! ```rust
//! use merka_core::money::Money;
//! use merka_core::ticket_total;
//!
//! let prices = [Money::from_cents(15000), Money::from_cents(10000)];
//! let tip = Money::from_cents(2000);
//!
//! assert_eq!(ticket_total(prices, tip).unwrap().cents(), 27000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod money;
pub mod report;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use report::{BarberSummary, DailyReport, MethodSummary, ReportTicket};
pub use session::{Session, View};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Timestamp layout of `tickets.fecha`.
///
/// `DATE(fecha)` in SQLite relies on this exact shape.
pub const TICKET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date layout used by the report filter.
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Computes a ticket's stored total: every line price plus the tip.
///
/// Fails with [`ValidationError::Overflow`] when the sum leaves `Money`'s range.
pub fn ticket_total(
    prices: impl IntoIterator<Item = Money>,
    tip: Money,
) -> Result<Money, ValidationError> {
    Money::checked_sum(prices)
        .and_then(|lines| lines.checked_add(tip))
        .ok_or_else(|| ValidationError::Overflow {
            field: "total".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_total_adds_tip() {
        let prices = vec![Money::from_cents(15000), Money::from_cents(20000)];
        assert_eq!(ticket_total(prices, Money::from_cents(1000)).unwrap().cents(), 36000);
    }

    #[test]
    fn test_ticket_total_without_lines_is_tip() {
        assert_eq!(ticket_total(Vec::new(), Money::from_cents(500)).unwrap().cents(), 500);
    }

    #[test]
    fn test_ticket_total_overflow_is_an_error() {
        let prices = vec![Money::from_cents(i64::MAX - 10)];
        let err = ticket_total(prices, Money::from_cents(11)).unwrap_err();
        assert!(matches!(err, ValidationError::Overflow { .. }));
    }
}

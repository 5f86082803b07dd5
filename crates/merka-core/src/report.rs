//! # Daily Report
//!
//! Aggregation behind the owner monitor ("Monitor Dueño").
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DailyReport (one calendar day)                                         │
//! │                                                                         │
//! │  total_sales   "Ventas Totales"       Σ ticket.total                    │
//! │  total_tips    "Propinas Entregadas"  Σ ticket.tip                      │
//! │  ticket_count  "Tickets Atendidos"    count                             │
//! │                                                                         │
//! │  tickets[]     newest first, each with its detail lines                 │
//! │  by_barber[]   tickets / sales / tips / commission per barber           │
//! │  by_method[]   tickets / total per payment method                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The database layer selects the rows for the day; everything here is
//! arithmetic over those rows.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Detail, PaymentMethod, Service};

/// Shown when the selected day has no tickets.
pub const EMPTY_DAY_NOTICE: &str = "No hay ventas registradas para esta fecha.";

/// One ticket as the monitor lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportTicket {
    pub id: i64,
    pub client: String,
    pub whatsapp: Option<String>,
    /// Barber name (joined from `barberos`).
    pub barber: String,
    pub total: Money,
    pub tip: Money,
    #[ts(as = "String")]
    pub time: NaiveTime,
    pub payment_method: PaymentMethod,
    pub details: Vec<Detail>,
}

/// Per-barber totals for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BarberSummary {
    pub barber: String,
    pub tickets: usize,
    pub sales: Money,
    pub tips: Money,
    /// Commission on the detail lines, at the catalog's current rates.
    pub commission: Money,
}

/// Per-payment-method totals for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MethodSummary {
    pub method: PaymentMethod,
    pub tickets: usize,
    pub total: Money,
}

/// The owner's view of one day of sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyReport {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub total_sales: Money,
    pub total_tips: Money,
    pub ticket_count: usize,
    pub tickets: Vec<ReportTicket>,
    pub by_barber: Vec<BarberSummary>,
    pub by_method: Vec<MethodSummary>,
    /// Set when there is nothing to show.
    pub notice: Option<String>,
}

impl DailyReport {
    /// Aggregates the tickets of `date`.
    ///
    /// `tickets` are expected newest first and already restricted to `date`.
    /// `services` supplies commission rates; detail lines whose service is
    /// no longer in the catalog earn no commission. Fails with
    /// [`ValidationError::Overflow`] if any sum leaves `Money`'s range.
    pub fn build(
        date: NaiveDate,
        tickets: Vec<ReportTicket>,
        services: &[Service],
    ) -> Result<Self, ValidationError> {
        let total_sales = sum("total_sales", tickets.iter().map(|t| t.total))?;
        let total_tips = sum("total_tips", tickets.iter().map(|t| t.tip))?;

        let mut barbers: BTreeMap<&str, BarberSummary> = BTreeMap::new();
        for ticket in &tickets {
            let entry = barbers
                .entry(ticket.barber.as_str())
                .or_insert_with(|| BarberSummary {
                    barber: ticket.barber.clone(),
                    tickets: 0,
                    sales: Money::zero(),
                    tips: Money::zero(),
                    commission: Money::zero(),
                });
            entry.tickets += 1;
            entry.sales = sum("sales", [entry.sales, ticket.total])?;
            entry.tips = sum("tips", [entry.tips, ticket.tip])?;
            let commission = commission_on(&ticket.details, services)?;
            entry.commission = sum("commission", [entry.commission, commission])?;
        }
        let by_barber = barbers.into_values().collect();

        let mut by_method = Vec::new();
        for method in PaymentMethod::ALL {
            let matching: Vec<&ReportTicket> = tickets
                .iter()
                .filter(|t| t.payment_method == method)
                .collect();
            if matching.is_empty() {
                continue;
            }
            by_method.push(MethodSummary {
                method,
                tickets: matching.len(),
                total: sum("by_method", matching.iter().map(|t| t.total))?,
            });
        }

        let notice = tickets.is_empty().then(|| EMPTY_DAY_NOTICE.to_string());

        Ok(DailyReport {
            date,
            total_sales,
            total_tips,
            ticket_count: tickets.len(),
            tickets,
            by_barber,
            by_method,
            notice,
        })
    }
}

fn sum(field: &str, amounts: impl IntoIterator<Item = Money>) -> Result<Money, ValidationError> {
    Money::checked_sum(amounts).ok_or_else(|| ValidationError::Overflow {
        field: field.to_string(),
    })
}

fn commission_on(details: &[Detail], services: &[Service]) -> Result<Money, ValidationError> {
    let earned = details.iter().filter_map(|d| {
        services
            .iter()
            .find(|s| s.name == d.service)
            .map(|s| d.price.commission(s.commission))
    });
    sum("commission", earned)
}

// =============================================================================
// Unit Tests
// =============================================================================

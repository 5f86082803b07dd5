//! # Report Repository
//!
//! Loads one calendar day of tickets for the owner monitor.
//!
//! Two queries per report: the day's tickets joined to barber names, then
//! every detail line of those tickets, grouped in memory.

use chrono::NaiveDate;
use merka_core::report::{DailyReport, ReportTicket};
use merka_core::types::{Detail, PaymentMethod};
use merka_core::validation::normalize_contact;
use merka_core::{Money, REPORT_DATE_FORMAT};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

use super::catalog::CatalogRepository;
use super::ticket::{parse_fecha, DetailRow};
use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: i64,
    cliente: String,
    whatsapp: Option<String>,
    barbero: String,
    total: f64,
    propina: f64,
    fecha: String,
    metodo_pago: PaymentMethod,
}

/// Repository for the daily report.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Tickets whose `DATE(fecha)` is `date`, newest first, with details.
    ///
    /// Tickets whose barber no longer exists are left out (inner join).
    pub async fn tickets_for_date(&self, date: NaiveDate) -> DbResult<Vec<ReportTicket>> {
        let day = date.format(REPORT_DATE_FORMAT).to_string();

        let rows: Vec<ReportRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.cliente, t.whatsapp, b.nombre AS barbero,
                   t.total, t.propina, t.fecha, t.metodo_pago
            FROM tickets t
            JOIN barberos b ON t.barbero_id = b.id
            WHERE DATE(t.fecha) = ?1
            ORDER BY t.fecha DESC, t.id DESC
            "#,
        )
        .bind(&day)
        .fetch_all(&self.pool)
        .await?;

        let detail_rows: Vec<DetailRow> = sqlx::query_as(
            r#"
            SELECT d.id, d.ticket_id, d.servicio, d.precio
            FROM detalles d
            JOIN tickets t ON d.ticket_id = t.id
            WHERE DATE(t.fecha) = ?1
            ORDER BY d.id
            "#,
        )
        .bind(&day)
        .fetch_all(&self.pool)
        .await?;

        let mut details: HashMap<i64, Vec<Detail>> = HashMap::new();
        for row in detail_rows {
            details.entry(row.ticket_id).or_default().push(Detail::from(row));
        }

        debug!(date = %day, tickets = rows.len(), "Loaded report tickets");

        rows.into_iter()
            .map(|row| {
                let fecha = parse_fecha(&row.fecha)?;
                Ok(ReportTicket {
                    details: details.remove(&row.id).unwrap_or_default(),
                    id: row.id,
                    client: row.cliente,
                    // blank contacts from older rows read as "none"
                    whatsapp: normalize_contact(row.whatsapp.as_deref()),
                    barber: row.barbero,
                    total: Money::from_decimal(row.total),
                    tip: Money::from_decimal(row.propina),
                    time: fecha.time(),
                    payment_method: row.metodo_pago,
                })
            })
            .collect()
    }

    /// Builds the full report for `date`.
    pub async fn daily_report(&self, date: NaiveDate) -> DbResult<DailyReport> {
        let tickets = self.tickets_for_date(date).await?;
        let services = CatalogRepository::new(self.pool.clone())
            .list_services()
            .await?;

        DailyReport::build(date, tickets, &services)
            .map_err(|e| DbError::corrupt("total", e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

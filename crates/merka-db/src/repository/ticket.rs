//! # Ticket Repository
//!
//! Writes completed sales and reads them back.
//!
//! ## Ticket Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │   1. INSERT tickets (…, total = 0)          → ticket id                 │
//! │   2. INSERT detalles × N (service, price)   frozen snapshot             │
//! │   3. UPDATE tickets SET total = Σ price + tip                           │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure before COMMIT rolls everything back: no zero-total         │
//! │  ticket, no orphan detail lines.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use merka_core::types::{Detail, NewTicket, PaymentMethod, Ticket};
use merka_core::validation::normalize_contact;
use merka_core::{Money, TICKET_TIMESTAMP_FORMAT};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i64,
    cliente: String,
    whatsapp: Option<String>,
    barbero_id: i64,
    total: f64,
    propina: f64,
    fecha: String,
    metodo_pago: PaymentMethod,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = DbError;

    fn try_from(row: TicketRow) -> DbResult<Self> {
        Ok(Ticket {
            created_at: parse_fecha(&row.fecha)?,
            id: row.id,
            client: row.cliente,
            whatsapp: normalize_contact(row.whatsapp.as_deref()),
            barber_id: row.barbero_id,
            total: Money::from_decimal(row.total),
            tip: Money::from_decimal(row.propina),
            payment_method: row.metodo_pago,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DetailRow {
    id: i64,
    pub(crate) ticket_id: i64,
    servicio: String,
    precio: f64,
}

impl From<DetailRow> for Detail {
    fn from(row: DetailRow) -> Self {
        Detail {
            id: row.id,
            ticket_id: row.ticket_id,
            service: row.servicio,
            price: Money::from_decimal(row.precio),
        }
    }
}

/// Parses a stored `fecha` value.
pub(crate) fn parse_fecha(raw: &str) -> DbResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TICKET_TIMESTAMP_FORMAT)
        .map_err(|_| DbError::corrupt("fecha", raw))
}

/// Repository for ticket database operations.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: SqlitePool,
}

impl TicketRepository {
    /// Creates a new TicketRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TicketRepository { pool }
    }

    /// Persists a validated sale as one ticket plus its detail lines.
    ///
    /// ## Arguments
    /// * `ticket` - Output of `merka_core::validation::validate_sale`
    /// * `at` - Local wall-clock time of the sale
    ///
    /// ## Returns
    /// The stored ticket; its `total` equals the detail prices plus tip.
    pub async fn create(&self, ticket: &NewTicket, at: NaiveDateTime) -> DbResult<Ticket> {
        if ticket.lines.is_empty() {
            return Err(DbError::Internal("ticket has no detail lines".to_string()));
        }

        // checked before BEGIN so an out-of-range sale writes nothing
        let total = ticket
            .total()
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let fecha = at.format(TICKET_TIMESTAMP_FORMAT).to_string();
        debug!(client = %ticket.client, barber_id = ticket.barber_id, lines = ticket.lines.len(), "Creating ticket");

        let mut tx = self.pool.begin().await?;

        let ticket_id = sqlx::query(
            r#"
            INSERT INTO tickets (cliente, whatsapp, barbero_id, total, propina, fecha, metodo_pago)
            VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6)
            "#,
        )
        .bind(&ticket.client)
        .bind(&ticket.whatsapp)
        .bind(ticket.barber_id)
        .bind(ticket.tip.to_decimal())
        .bind(&fecha)
        .bind(ticket.payment_method)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for line in &ticket.lines {
            sqlx::query("INSERT INTO detalles (ticket_id, servicio, precio) VALUES (?1, ?2, ?3)")
                .bind(ticket_id)
                .bind(&line.service)
                .bind(line.price.to_decimal())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE tickets SET total = ?1 WHERE id = ?2")
            .bind(total.to_decimal())
            .bind(ticket_id)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(ticket_id, total = %total, method = %ticket.payment_method, "Ticket created");

        Ok(Ticket {
            id: ticket_id,
            client: ticket.client.clone(),
            whatsapp: ticket.whatsapp.clone(),
            barber_id: ticket.barber_id,
            total,
            tip: ticket.tip,
            created_at: at,
            payment_method: ticket.payment_method,
        })
    }

    /// Gets a ticket by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Ticket>> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT id, cliente, whatsapp, barbero_id, total, propina, fecha, metodo_pago
            FROM tickets
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Ticket::try_from).transpose()
    }

    /// Gets the detail lines of a ticket, in insertion order.
    pub async fn details(&self, ticket_id: i64) -> DbResult<Vec<Detail>> {
        let rows: Vec<DetailRow> = sqlx::query_as(
            "SELECT id, ticket_id, servicio, precio FROM detalles WHERE ticket_id = ?1 ORDER BY id",
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Detail::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

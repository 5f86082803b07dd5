//! # Catalog Repository
//!
//! Read access to the service list and the staff list. Both are seeded at
//! startup and only change through direct database edits.

use merka_core::types::{Barber, CommissionRate, Role, Service};
use merka_core::Money;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: i64,
    nombre: String,
    precio: f64,
    comision: f64,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            id: row.id,
            name: row.nombre,
            price: Money::from_decimal(row.precio),
            commission: CommissionRate::from_percentage(row.comision),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BarberRow {
    id: i64,
    nombre: String,
    rol: Role,
}

impl From<BarberRow> for Barber {
    fn from(row: BarberRow) -> Self {
        Barber {
            id: row.id,
            name: row.nombre,
            role: row.rol,
        }
    }
}

/// Repository for services and barbers.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// All services, in catalog order.
    pub async fn list_services(&self) -> DbResult<Vec<Service>> {
        let rows: Vec<ServiceRow> =
            sqlx::query_as("SELECT id, nombre, precio, comision FROM servicios ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        debug!(count = rows.len(), "Loaded services");
        Ok(rows.into_iter().map(Service::from).collect())
    }

    /// Barbers a sale can be attributed to (everyone except Admins).
    pub async fn list_barbers(&self) -> DbResult<Vec<Barber>> {
        let rows: Vec<BarberRow> = sqlx::query_as(
            "SELECT id, nombre, rol FROM barberos WHERE rol != ?1 ORDER BY id",
        )
        .bind(Role::Admin)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded barbers");
        Ok(rows.into_iter().map(Barber::from).collect())
    }

    /// Every staff member, Admins included.
    pub async fn list_all_barbers(&self) -> DbResult<Vec<Barber>> {
        let rows: Vec<BarberRow> = sqlx::query_as("SELECT id, nombre, rol FROM barberos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Barber::from).collect())
    }
}

//! # Schema Initialization
//!
//! The schema is created in place on every startup instead of through a
//! migration table, so a `barberia.db` written by earlier versions of the
//! shop software opens unchanged.
//!
//! ```text
//! init()
//!   ├── CREATE TABLE IF NOT EXISTS servicios / barberos / tickets / detalles
//!   ├── tickets.whatsapp missing?  ──► ALTER TABLE tickets ADD COLUMN whatsapp
//!   └── CREATE INDEX IF NOT EXISTS idx_tickets_fecha
//!
//! seed_defaults()
//!   ├── servicios empty? ──► 4 default services
//!   └── barberos empty?  ──► Juan (Barbero), Dueño (Admin)
//! ```
//!
//! Money columns stay `REAL` and commissions stay whole percentages; the
//! repositories convert to [`Money`] and [`CommissionRate`] at the edge.

use merka_core::types::{CommissionRate, Role};
use merka_core::Money;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const CREATE_SERVICIOS: &str = r#"
    CREATE TABLE IF NOT EXISTS servicios (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT,
        precio REAL,
        comision REAL
    )
"#;

const CREATE_BARBEROS: &str = r#"
    CREATE TABLE IF NOT EXISTS barberos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT,
        rol TEXT
    )
"#;

const CREATE_TICKETS: &str = r#"
    CREATE TABLE IF NOT EXISTS tickets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        cliente TEXT,
        whatsapp TEXT,
        barbero_id INTEGER,
        total REAL,
        propina REAL,
        fecha TEXT,
        metodo_pago TEXT,
        FOREIGN KEY(barbero_id) REFERENCES barberos(id)
    )
"#;

const CREATE_DETALLES: &str = r#"
    CREATE TABLE IF NOT EXISTS detalles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ticket_id INTEGER,
        servicio TEXT,
        precio REAL,
        FOREIGN KEY(ticket_id) REFERENCES tickets(id)
    )
"#;

const CREATE_FECHA_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tickets_fecha ON tickets (fecha)";

/// Default catalog: (name, price in currency units, commission %).
pub const DEFAULT_SERVICES: [(&str, i64, f64); 4] = [
    ("Corte Clásico", 150, 50.0),
    ("Barba Express", 100, 50.0),
    ("Premium (Corte+Barba)", 300, 60.0),
    ("Producto: Pomada", 200, 20.0),
];

/// Default staff.
pub const DEFAULT_BARBERS: [(&str, Role); 2] = [("Juan", Role::Barbero), ("Dueño", Role::Admin)];

/// Creates missing tables and columns. Never drops or rewrites data.
pub async fn init(pool: &SqlitePool) -> DbResult<()> {
    for ddl in [CREATE_SERVICIOS, CREATE_BARBEROS, CREATE_TICKETS, CREATE_DETALLES] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| DbError::SchemaFailed(e.to_string()))?;
    }

    // Tables created before the contact field existed.
    if !has_column(pool, "tickets", "whatsapp").await? {
        info!("Adding tickets.whatsapp column");
        sqlx::query("ALTER TABLE tickets ADD COLUMN whatsapp TEXT")
            .execute(pool)
            .await
            .map_err(|e| DbError::SchemaFailed(e.to_string()))?;
    }

    sqlx::query(CREATE_FECHA_INDEX)
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    Ok(())
}

/// Inserts the default services and barbers into empty tables.
///
/// A table that already has rows is left alone, even if it holds none of
/// the defaults.
pub async fn seed_defaults(pool: &SqlitePool) -> DbResult<()> {
    let mut tx = pool.begin().await?;

    let services: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM servicios")
        .fetch_one(&mut *tx)
        .await?;
    if services == 0 {
        info!(count = DEFAULT_SERVICES.len(), "Seeding default services");
        for (name, price, commission) in DEFAULT_SERVICES {
            let price = Money::from_major(price);
            let commission = CommissionRate::from_percentage(commission);
            sqlx::query("INSERT INTO servicios (nombre, precio, comision) VALUES (?1, ?2, ?3)")
                .bind(name)
                .bind(price.to_decimal())
                .bind(commission.percentage())
                .execute(&mut *tx)
                .await?;
        }
    }

    let barbers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM barberos")
        .fetch_one(&mut *tx)
        .await?;
    if barbers == 0 {
        info!(count = DEFAULT_BARBERS.len(), "Seeding default barbers");
        for (name, role) in DEFAULT_BARBERS {
            sqlx::query("INSERT INTO barberos (nombre, rol) VALUES (?1, ?2)")
                .bind(name)
                .bind(role)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    debug!(services, barbers, "Seed check complete");
    Ok(())
}

/// Whether `table` has a column named `column`.
pub async fn has_column(pool: &SqlitePool, table: &str, column: &str) -> DbResult<bool> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
        .bind(table)
        .fetch_all(pool)
        .await?;

    Ok(columns.iter().any(|c| c == column))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn bare() -> Database {
        Database::new(DbConfig::in_memory().init_schema(false))
            .await
            .unwrap()
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_init_creates_tables() {
        let db = bare().await;
        init(db.pool()).await.unwrap();

        for table in ["servicios", "barberos", "tickets", "detalles"] {
            assert_eq!(count(db.pool(), table).await, 0, "{table} should exist and be empty");
        }
        assert!(has_column(db.pool(), "tickets", "whatsapp").await.unwrap());
    }

    #[tokio::test]
    async fn test_seed_counts() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(count(db.pool(), "servicios").await, 4);
        assert_eq!(count(db.pool(), "barberos").await, 2);
        assert_eq!(count(db.pool(), "tickets").await, 0);
    }

    #[tokio::test]
    async fn test_init_twice_is_harmless() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.init_schema(true).await.unwrap();
        db.init_schema(true).await.unwrap();

        assert_eq!(count(db.pool(), "servicios").await, 4);
        assert_eq!(count(db.pool(), "barberos").await, 2);

        let whatsapp_columns: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('tickets') WHERE name = 'whatsapp'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(whatsapp_columns, 1);
    }

    #[tokio::test]
    async fn test_legacy_tickets_table_gains_whatsapp() {
        let db = bare().await;
        sqlx::query(
            "CREATE TABLE tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cliente TEXT,
                barbero_id INTEGER,
                total REAL,
                propina REAL,
                fecha TEXT,
                metodo_pago TEXT
            )",
        )
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO tickets (cliente, barbero_id, total, propina, fecha, metodo_pago)
             VALUES ('Ana', 1, 150, 0, '2025-01-02 09:30:00', 'Efectivo')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        assert!(!has_column(db.pool(), "tickets", "whatsapp").await.unwrap());

        init(db.pool()).await.unwrap();

        assert!(has_column(db.pool(), "tickets", "whatsapp").await.unwrap());
        assert_eq!(count(db.pool(), "tickets").await, 1);
        let whatsapp: Option<String> = sqlx::query_scalar("SELECT whatsapp FROM tickets")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert!(whatsapp.is_none());
    }

    #[tokio::test]
    async fn test_seed_leaves_populated_tables_alone() {
        let db = bare().await;
        init(db.pool()).await.unwrap();
        sqlx::query("INSERT INTO barberos (nombre, rol) VALUES ('Pedro', 'Barbero')")
            .execute(db.pool())
            .await
            .unwrap();

        seed_defaults(db.pool()).await.unwrap();

        assert_eq!(count(db.pool(), "barberos").await, 1);
        assert_eq!(count(db.pool(), "servicios").await, 4);
    }

    #[tokio::test]
    async fn test_seeded_values() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (price, commission): (f64, f64) =
            sqlx::query_as("SELECT precio, comision FROM servicios WHERE nombre = 'Premium (Corte+Barba)'")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(price, 300.0);
        assert_eq!(commission, 60.0);

        let role: String = sqlx::query_scalar("SELECT rol FROM barberos WHERE nombre = 'Dueño'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(role, "Admin");
    }
}

//! # merka-db: Database Layer for Merka POS
//!
//! This crate provides database access for Merka POS.
//! It uses a single SQLite file with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Merka POS Data Flow                              │
//! │                                                                         │
//! │  Server route (POST /sale)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     merka-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │ (catalog.rs)  │    │ (schema.rs)  │  │   │
//! │  │   │               │    │ (ticket.rs)   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ (report.rs)   │    │ CREATE … IF  │  │   │
//! │  │   │               │    │               │    │ NOT EXISTS,  │  │   │
//! │  │   │               │    │               │    │ seeds        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   barberia.db: servicios · barberos · tickets · detalles        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Idempotent schema, column migration and seed data
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (catalog, ticket, report)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use merka_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("barberia.db")).await?;
//! let services = db.catalog().list_services().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::report::ReportRepository;
pub use repository::ticket::TicketRepository;

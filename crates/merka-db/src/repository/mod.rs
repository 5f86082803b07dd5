//! # Repository Module
//!
//! Database repository implementations for Merka POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.tickets().create(&new_ticket, now)                         │
//! │       ▼                                                                 │
//! │  TicketRepository                                                      │
//! │  ├── create(&self, ticket, at)      one transaction                    │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── details(&self, ticket_id)                                         │
//! │       │                                                                 │
//! │       │  SQL (legacy Spanish table/column names)                       │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are read into private `*Row` structs that mirror the stored
//! columns, then converted into `merka-core` types. Money is `REAL` on
//! disk and [`merka_core::Money`] everywhere else.
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - Services and barbers
//! - [`TicketRepository`](ticket::TicketRepository) - Ticket creation and lookup
//! - [`ReportRepository`](report::ReportRepository) - Daily owner report

pub mod catalog;
pub mod report;
pub mod ticket;

//! # Merka POS Server
//!
//! HTTP/JSON front of the barbershop: login, sale entry and the owner
//! monitor.
//!
//! ## Module Organization
//! ```text
//! src/
//! ├── lib.rs           ← You are here (tracing, re-exports)
//! ├── main.rs          ← Binary: config, database, serve
//! ├── config.rs        ← ServerConfig (host, port, database path)
//! ├── error.rs         ← ApiError (JSON error bodies)
//! ├── routes/
//! │   ├── mod.rs       ← router()
//! │   ├── health.rs
//! │   ├── config.rs
//! │   ├── auth.rs      ← login / logout / session / view
//! │   ├── sale.rs      ← sale form + ticket submission
//! │   └── monitor.rs   ← daily report (Admin)
//! └── state/
//!     ├── mod.rs       ← AppState + FromRef projections
//!     ├── db.rs        ← DbState
//!     ├── session.rs   ← SessionStore, cookies, CurrentSession
//!     └── config.rs    ← ConfigState (store identity, currency)
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use routes::router;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "info,merka_server=debug,merka_db=debug,tower_http=debug,sqlx=warn";

/// Initializes the tracing subscriber (logging).
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Verbose output for development
/// - `RUST_LOG=info` - Normal operation
/// - `RUST_LOG=warn` - Only warnings and errors
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

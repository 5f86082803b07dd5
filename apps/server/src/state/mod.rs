//! # State Module
//!
//! Shared state for the HTTP handlers.
//!
//! Handlers ask for the piece they need (`State<DbState>`,
//! `State<Arc<ConfigState>>`, or the `CurrentSession` extractor) and axum
//! projects it out of [`AppState`] through `FromRef`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │                         AppState (Clone)                                │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   DbState    │  │ SessionStore │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Database    │  │  Arc<Mutex<  │  │  store_name      │              │
//! │  │  (SQLite     │  │   HashMap<   │  │  branch          │              │
//! │  │   pool)      │  │   id,Session │  │  contact_phone   │              │
//! │  │              │  │  >>>         │  │  currency        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: the pool is internally synchronized                        │
//! │  • SessionStore: Arc<Mutex<T>>, short critical sections                │
//! │  • ConfigState: read-only after startup, behind Arc                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod session;

pub use config::ConfigState;
pub use db::DbState;
pub use session::{
    expired_cookie, session_cookie, session_id, CurrentSession, SessionStore, SESSION_COOKIE,
};

use axum::extract::FromRef;
use merka_db::Database;
use std::sync::Arc;

/// Everything the router shares between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DbState,
    pub sessions: SessionStore,
    pub config: Arc<ConfigState>,
}

impl AppState {
    pub fn new(db: Database, config: ConfigState) -> Self {
        AppState {
            db: DbState::new(db),
            sessions: SessionStore::new(),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for DbState {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<ConfigState> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

//! # Database State
//!
//! Wraps the `Database` handle for use as axum state.
//!
//! ## Thread Safety
//! `Database` holds a `SqlitePool`, which is already shared and
//! thread-safe. Handlers run queries concurrently without extra locking.
//!
//! ## Usage in Handlers
//! ```rust,ignore
//! async fn sale_form(State(db): State<DbState>) -> ApiResult<Json<SaleFormView>> {
//!     let services = db.inner().catalog().list_services().await?;
//!     ...
//! }
//! ```

use merka_db::Database;

/// Database handle as handler state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}

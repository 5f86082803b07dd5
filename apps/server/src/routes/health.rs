//! # Health
//!
//! `GET /health`: liveness plus a `SELECT 1` against the pool. Public.
//! A failed database check still answers 200 with `status: "degraded"`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::{AppState, DbState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether `SELECT 1` succeeded.
    pub database: bool,
}

async fn health_check(State(db): State<DbState>) -> Json<HealthResponse> {
    let database = db.inner().health_check().await;
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

//! # Owner Monitor
//!
//! `GET /monitor?date=YYYY-MM-DD`, Admin only. The date defaults to the
//! server's local today.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use merka_core::validation::parse_report_date;
use merka_core::DailyReport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{AppState, ConfigState, CurrentSession, DbState};

#[derive(Debug, Default, Deserialize)]
pub struct MonitorQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MonitorView {
    /// "Monitor en Tiempo Real - Sucursal Centro"
    pub title: String,
    pub report: DailyReport,
}

async fn monitor(
    State(db): State<DbState>,
    State(config): State<Arc<ConfigState>>,
    current: CurrentSession,
    Query(query): Query<MonitorQuery>,
) -> ApiResult<Json<MonitorView>> {
    current.session.require_admin()?;

    let date = match query.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_report_date(raw)?,
        None => Local::now().date_naive(),
    };
    debug!(%date, "Loading daily report");

    let report = db.inner().reports().daily_report(date).await?;

    Ok(Json(MonitorView {
        title: format!("Monitor en Tiempo Real - {}", config.branch),
        report,
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/monitor", get(monitor))
}

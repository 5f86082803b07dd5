//! Store identity for clients (title, footer, currency). Public.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

use crate::state::{AppState, ConfigState};

async fn get_config(State(config): State<Arc<ConfigState>>) -> Json<ConfigState> {
    Json(ConfigState::clone(&config))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/config", get(get_config))
}

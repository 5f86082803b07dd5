//! # Login, Logout and Navigation
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /login  {username, password}                                      │
//! │     ├── admin / 1234    ──► Session { Admin,   Venta }  + cookie        │
//! │     ├── barbero / 1234  ──► Session { Barbero, Venta }  + cookie        │
//! │     └── anything else   ──► 401 "Usuario o contraseña incorrectos"      │
//! │                                                                         │
//! │  GET  /session          ──► { role, view, greeting: "Hola, Admin" }     │
//! │  POST /view {view}      ──► sidebar: "venta" | "monitor"                │
//! │  POST /logout           ──► session dropped, cookie expired             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use merka_core::auth::authenticate;
use merka_core::{Role, Session, View};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::{
    expired_cookie, session_cookie, session_id, AppState, CurrentSession, SessionStore,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub view: View,
}

/// What the sidebar shows for the current session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub role: Role,
    pub view: View,
    pub greeting: String,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        SessionView {
            role: session.role,
            view: session.view,
            greeting: session.greeting(),
        }
    }
}

async fn login(
    State(sessions): State<SessionStore>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    let role = authenticate(&req.username, &req.password).inspect_err(|_| {
        warn!(username = %req.username, "Rejected login");
    })?;

    // Logging in again replaces whatever session the client held.
    if let Some(previous) = session_id(&headers) {
        sessions.close(&previous);
    }

    let (id, session) = sessions.open(role);
    info!(%role, "Logged in");

    Ok((
        [(header::SET_COOKIE, session_cookie(&id).to_string())],
        Json(SessionView::from(&session)),
    ))
}

async fn logout(State(sessions): State<SessionStore>, current: CurrentSession) -> impl IntoResponse {
    sessions.close(&current.id);
    info!(role = %current.session.role, "Logged out");

    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, expired_cookie().to_string())],
    )
}

async fn current_session(current: CurrentSession) -> Json<SessionView> {
    Json(SessionView::from(&current.session))
}

async fn navigate(
    State(sessions): State<SessionStore>,
    current: CurrentSession,
    payload: Result<Json<NavigateRequest>, JsonRejection>,
) -> ApiResult<Json<SessionView>> {
    let Json(req) = payload?;
    let session = sessions
        .navigate(&current.id, req.view)
        .ok_or_else(ApiError::unauthorized)?;
    Ok(Json(SessionView::from(&session)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(current_session))
        .route("/view", post(navigate))
}

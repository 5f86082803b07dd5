//! # Sale Routes
//!
//! "Nueva Venta": what the form offers, and ticket submission.
//!
//! ## Submission
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /sale  SaleForm                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load barbers (non-Admin) + services                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_sale()  ── client/services → barber → services → tip → method │
//! │       │                 (first failure wins, nothing written)           │
//! │       ▼                                                                 │
//! │  tickets().create(ticket, local now)   one transaction                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  201 { ticket_id, total, message: "Venta Exitosa! Total: $360.50" }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use merka_core::types::{Barber, PaymentMethod};
use merka_core::validation::{validate_sale, SaleForm};
use merka_core::Money;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{AppState, ConfigState, CurrentSession, DbState};

pub const NO_BARBERS: &str = "No hay barberos registrados.";
pub const NO_SERVICES: &str = "No hay servicios configurados.";

/// One selectable service.
#[derive(Debug, Serialize)]
pub struct ServiceOption {
    pub name: String,
    pub price: Money,
    /// e.g. `Corte Clásico ($150.00)`
    pub label: String,
}

/// Everything the sale form needs to render.
#[derive(Debug, Serialize)]
pub struct SaleFormView {
    pub barbers: Vec<Barber>,
    pub services: Vec<ServiceOption>,
    pub payment_methods: [PaymentMethod; 3],
    /// Non-blocking notices for an empty catalog.
    pub warnings: Vec<&'static str>,
}

/// Result of a successful sale.
#[derive(Debug, Serialize)]
pub struct SaleReceipt {
    pub ticket_id: i64,
    pub total: Money,
    pub message: String,
}

async fn sale_form(
    State(db): State<DbState>,
    State(config): State<Arc<ConfigState>>,
    _current: CurrentSession,
) -> ApiResult<Json<SaleFormView>> {
    let catalog = db.inner().catalog();
    let barbers = catalog.list_barbers().await?;
    let services = catalog.list_services().await?;

    let mut warnings = Vec::new();
    if barbers.is_empty() {
        warnings.push(NO_BARBERS);
    }
    if services.is_empty() {
        warnings.push(NO_SERVICES);
    }

    let services = services
        .into_iter()
        .map(|s| ServiceOption {
            label: format!("{} ({})", s.name, config.format_currency(s.price)),
            name: s.name,
            price: s.price,
        })
        .collect();

    Ok(Json(SaleFormView {
        barbers,
        services,
        payment_methods: PaymentMethod::ALL,
        warnings,
    }))
}

async fn submit_sale(
    State(db): State<DbState>,
    State(config): State<Arc<ConfigState>>,
    current: CurrentSession,
    payload: Result<Json<SaleForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SaleReceipt>)> {
    let Json(form) = payload?;
    debug!(role = %current.session.role, services = form.services.len(), "Sale submitted");

    let catalog = db.inner().catalog();
    let barbers = catalog.list_barbers().await?;
    let services = catalog.list_services().await?;

    let ticket = validate_sale(&form, &barbers, &services)?;
    let saved = db
        .inner()
        .tickets()
        .create(&ticket, Local::now().naive_local())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SaleReceipt {
            ticket_id: saved.id,
            total: saved.total,
            message: format!("Venta Exitosa! Total: {}", config.format_currency(saved.total)),
        }),
    ))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sale/form", get(sale_form))
        .route("/sale", post(submit_sale))
}

//! # Routes
//!
//! HTTP surface of the shop.
//!
//! ## Route Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Route Modules                                    │
//! │                                                                         │
//! │  health.rs   GET  /health                         public               │
//! │  config.rs   GET  /config                         public               │
//! │  auth.rs     POST /login                          public               │
//! │              POST /logout, GET /session,                               │
//! │              POST /view                           session              │
//! │  sale.rs     GET  /sale/form, POST /sale          session              │
//! │  monitor.rs  GET  /monitor?date=                  session + Admin      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "session" routes take the `CurrentSession` extractor, which answers 401
//! before the handler runs.

pub mod auth;
pub mod config;
pub mod health;
pub mod monitor;
pub mod sale;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(config::routes())
        .merge(auth::routes())
        .merge(sale::routes())
        .merge(monitor::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use axum::body::Body;
    use axum::http::{header, Method, Request, Response, StatusCode};
    use merka_db::{Database, DbConfig};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        app_with(DbConfig::in_memory()).await
    }

    async fn app_with(config: DbConfig) -> Router {
        let db = Database::new(config).await.unwrap();
        router(AppState::new(db, ConfigState::default()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(req).await.unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Logs in and returns the `name=value` pair to send back.
    async fn login(app: &Router, username: &str) -> String {
        let response = send(
            app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": username, "password": "1234" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn sale_body(client: &str, barber: &str, services: &[&str], tip: f64) -> Value {
        json!({
            "client": client,
            "whatsapp": "+506 8888 0000",
            "barber": barber,
            "services": services,
            "tip": tip,
            "payment_method": "Sinpe Móvil",
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let response = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], true);
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn test_config_is_public() {
        let app = app().await;
        let json = body_json(send(&app, Method::GET, "/config", None, None).await).await;
        assert_eq!(json["store_name"], "Software Merka 4.0");
        assert_eq!(json["contact_phone"], "+506 6449 8045");
        assert_eq!(json["currency_symbol"], "$");
    }

    #[tokio::test]
    async fn test_wrong_credentials() {
        let app = app().await;
        let response = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "admin", "password": "admin" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert_eq!(json["message"], "Usuario o contraseña incorrectos");
    }

    #[tokio::test]
    async fn test_protected_routes_need_a_session() {
        let app = app().await;
        for (method, uri) in [
            (Method::GET, "/session"),
            (Method::GET, "/sale/form"),
            (Method::GET, "/monitor"),
            (Method::POST, "/logout"),
        ] {
            let response = send(&app, method, uri, None, None).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }

        let stale = send(&app, Method::GET, "/session", Some("merka_session=nope"), None).await;
        assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_and_navigation() {
        let app = app().await;
        let cookie = login(&app, "barbero").await;

        let json = body_json(send(&app, Method::GET, "/session", Some(&cookie), None).await).await;
        assert_eq!(json["role"], "Barbero");
        assert_eq!(json["view"], "venta");
        assert_eq!(json["greeting"], "Hola, Barbero");

        let response = send(
            &app,
            Method::POST,
            "/view",
            Some(&cookie),
            Some(json!({ "view": "monitor" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(send(&app, Method::GET, "/session", Some(&cookie), None).await).await;
        assert_eq!(json["view"], "monitor");
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let app = app().await;
        let cookie = login(&app, "admin").await;

        let response = send(&app, Method::POST, "/logout", Some(&cookie), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cleared = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cleared.contains("Max-Age=0"));

        let response = send(&app, Method::GET, "/session", Some(&cookie), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_sale_form() {
        let app = app().await;
        let cookie = login(&app, "barbero").await;

        let json = body_json(send(&app, Method::GET, "/sale/form", Some(&cookie), None).await).await;
        let barbers = json["barbers"].as_array().unwrap();
        assert_eq!(barbers.len(), 1);
        assert_eq!(barbers[0]["name"], "Juan");
        assert_eq!(json["services"].as_array().unwrap().len(), 4);
        assert_eq!(json["services"][0]["label"], "Corte Clásico ($150.00)");
        assert_eq!(json["payment_methods"], json!(["Efectivo", "Tarjeta", "Sinpe Móvil"]));
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sale_form_warns_on_empty_catalog() {
        let app = app_with(DbConfig::in_memory().seed(false)).await;
        let cookie = login(&app, "admin").await;

        let json = body_json(send(&app, Method::GET, "/sale/form", Some(&cookie), None).await).await;
        assert_eq!(
            json["warnings"],
            json!([sale::NO_BARBERS, sale::NO_SERVICES])
        );
    }

    #[tokio::test]
    async fn test_submit_sale() {
        let app = app().await;
        let cookie = login(&app, "barbero").await;

        let response = send(
            &app,
            Method::POST,
            "/sale",
            Some(&cookie),
            Some(sale_body("Carlos", "Juan", &["Corte Clásico", "Producto: Pomada"], 10.5)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["ticket_id"], 1);
        assert_eq!(json["total"], 36050);
        assert_eq!(json["message"], "Venta Exitosa! Total: $360.50");
    }

    #[tokio::test]
    async fn test_sale_validation_messages() {
        let app = app().await;
        let cookie = login(&app, "barbero").await;

        let cases = [
            (sale_body("", "Juan", &["Corte Clásico"], 0.0), "Falta nombre del cliente o servicios."),
            (sale_body("Ana", "Juan", &[], 0.0), "Falta nombre del cliente o servicios."),
            (sale_body("Ana", "Dueño", &["Corte Clásico"], 0.0), "Error al identificar barbero."),
        ];
        for (body, message) in cases {
            let response = send(&app, Method::POST, "/sale", Some(&cookie), Some(body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await["message"], message);
        }

        let response = send(
            &app,
            Method::POST,
            "/sale",
            Some(&cookie),
            Some(sale_body("Ana", "Juan", &["Corte Clásico"], -5.0)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_payment_method_is_a_validation_error() {
        let app = app().await;
        let cookie = login(&app, "barbero").await;

        let mut body = sale_body("Ana", "Juan", &["Corte Clásico"], 0.0);
        body["payment_method"] = json!("Bitcoin");
        let response = send(&app, Method::POST, "/sale", Some(&cookie), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("payment_method"));
    }

    #[tokio::test]
    async fn test_payment_method_defaults_to_cash() {
        let app = app().await;
        let cookie = login(&app, "barbero").await;

        let mut body = sale_body("Ana", "Juan", &["Corte Clásico"], 0.0);
        body.as_object_mut().unwrap().remove("payment_method");
        let response = send(&app, Method::POST, "/sale", Some(&cookie), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let admin = login(&app, "admin").await;
        let json = body_json(send(&app, Method::GET, "/monitor", Some(&admin), None).await).await;
        assert_eq!(json["report"]["tickets"][0]["payment_method"], "Efectivo");
    }

    #[tokio::test]
    async fn test_huge_tip_is_rejected_and_nothing_stored() {
        let app = app().await;
        let cookie = login(&app, "barbero").await;

        let response = send(
            &app,
            Method::POST,
            "/sale",
            Some(&cookie),
            Some(sale_body("Ana", "Juan", &["Corte Clásico"], 1e17)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        let admin = login(&app, "admin").await;
        let json = body_json(send(&app, Method::GET, "/monitor", Some(&admin), None).await).await;
        assert_eq!(json["report"]["ticket_count"], 0);
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_json_errors() {
        let app = app().await;
        let response = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "admin" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        let cookie = login(&app, "barbero").await;
        let mut body = sale_body("Ana", "Juan", &["Corte Clásico"], 0.0);
        body["tip"] = json!("diez");
        let response = send(&app, Method::POST, "/sale", Some(&cookie), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_monitor_is_admin_only() {
        let app = app().await;
        let cookie = login(&app, "barbero").await;

        let response = send(&app, Method::GET, "/monitor", Some(&cookie), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await["message"],
            "Acceso restringido solo para Administradores."
        );
    }

    #[tokio::test]
    async fn test_monitor_reports_todays_sales() {
        let app = app().await;
        let barber = login(&app, "barbero").await;
        for tip in [0.0, 20.0] {
            let response = send(
                &app,
                Method::POST,
                "/sale",
                Some(&barber),
                Some(sale_body("Luis", "Juan", &["Premium (Corte+Barba)"], tip)),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let admin = login(&app, "admin").await;
        let json = body_json(send(&app, Method::GET, "/monitor", Some(&admin), None).await).await;
        assert_eq!(json["title"], "Monitor en Tiempo Real - Sucursal Centro");
        assert_eq!(json["report"]["ticket_count"], 2);
        assert_eq!(json["report"]["total_sales"], 62000);
        assert_eq!(json["report"]["total_tips"], 2000);
        assert_eq!(json["report"]["tickets"][0]["payment_method"], "Sinpe Móvil");
        assert!(json["report"]["notice"].is_null());

        let json = body_json(
            send(&app, Method::GET, "/monitor?date=2001-01-01", Some(&admin), None).await,
        )
        .await;
        assert_eq!(json["report"]["ticket_count"], 0);
        assert_eq!(json["report"]["notice"], "No hay ventas registradas para esta fecha.");
    }

    #[tokio::test]
    async fn test_monitor_rejects_bad_date() {
        let app = app().await;
        let admin = login(&app, "admin").await;
        let response = send(&app, Method::GET, "/monitor?date=01/01/2001", Some(&admin), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

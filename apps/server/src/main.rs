//! # Merka POS Server Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. .env + tracing                                                      │
//! │  2. ServerConfig::load()      MERKA_HOST / MERKA_PORT / MERKA_DB_PATH   │
//! │  3. Database::new()           pool, schema, whatsapp column, seeds      │
//! │  4. axum::serve()             until Ctrl+C / SIGTERM                    │
//! │  5. pool closed                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use merka_db::{Database, DbConfig};
use merka_server::config::ServerConfig;
use merka_server::state::{AppState, ConfigState};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    merka_server::init_tracing();

    info!("Starting Merka POS server...");

    let server = ServerConfig::load()?;
    let store = ConfigState::from_env();
    info!(
        addr = %server.socket_addr(),
        db = %server.database_path.display(),
        store = %store.store_name,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&server.database_path)).await?;

    let app = merka_server::router(AppState::new(db.clone(), store));

    let listener = TcpListener::bind(server.socket_addr()).await?;
    info!(addr = %server.socket_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

use anyhow::Context;
use tokio::net::TcpListener;

use crate::api::{self, state::AppState};
use crate::config::AppConfig;
use crate::database::Database;

pub async fn handle(config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.database.auto_migrate {
        db.migrate().await.context("failed to apply migrations")?;
    }

    let port = port.unwrap_or(config.api.port);
    let state = AppState::new(config, db.clone()).context("failed to initialise token service")?;
    let app = api::router(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Task Management API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

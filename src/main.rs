use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_engine::config::EnvironmentConfig;
use fleet_engine::database::DatabaseConnection;
use fleet_engine::repositories::snapshot::DatabaseSnapshotSource;
use fleet_engine::routes::create_router;
use fleet_engine::services::{FleetManager, TokenPaymentGateway};
use fleet_engine::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    info!("🚲 Starting fleet engine ({})", config.environment);

    let database = DatabaseConnection::new_default().await?;
    let source = DatabaseSnapshotSource::new(database.pool().clone());
    let fleet = FleetManager::load(&source, Arc::new(TokenPaymentGateway::new()))
        .await
        .map_err(|e| anyhow::anyhow!("failed to load fleet snapshot: {}", e))?;

    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️  CORS_ORIGINS is empty, every origin will be accepted");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(Arc::new(fleet), config);
    let app = create_router(state);

    info!("🌐 Listening on http://{}", addr);
    info!("📍 GET  /stations, /stations/nearest?lat=&lon=, /stations/:id");
    info!("🛴 GET  /vehicles?station_id=, /vehicles/:id  POST /vehicles/:id/charge");
    info!("👤 POST /users  GET /users/:id, /users/:id/ride");
    info!("🚦 POST /rides/start, /rides/end");
    info!("🔧 POST /maintenance/treat  GET /fleet/stats");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Terminate signal received, shutting down...");
        },
    }
}

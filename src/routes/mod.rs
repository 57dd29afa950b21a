//! HTTP routes
//!
//! `create_router` assembles the whole API around an `AppState`.

pub mod maintenance_routes;
pub mod ride_routes;
pub mod station_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/stations", station_routes::create_station_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/users", ride_routes::create_user_router())
        .nest("/rides", ride_routes::create_ride_router())
        .merge(maintenance_routes::create_maintenance_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Server is running" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::TreatVehiclesResponse;
use crate::services::FleetStats;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/maintenance/treat", post(treat_vehicles))
        .route("/fleet/stats", get(fleet_stats))
}

async fn treat_vehicles(
    State(state): State<AppState>,
) -> Result<Json<TreatVehiclesResponse>, AppError> {
    let controller = MaintenanceController::new(state.fleet.clone());
    let response = controller.treat_vehicles().await?;
    Ok(Json(response))
}

async fn fleet_stats(State(state): State<AppState>) -> Result<Json<FleetStats>, AppError> {
    let controller = MaintenanceController::new(state.fleet.clone());
    let response = controller.stats().await?;
    Ok(Json(response))
}

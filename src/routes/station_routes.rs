use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::controllers::station_controller::StationController;
use crate::dto::station_dto::{CoordinatesQuery, NearestStationResponse, StationResponse};
use crate::models::StationId;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_station_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stations))
        .route("/nearest", get(get_nearest_station))
        .route("/:id", get(get_station))
}

async fn get_nearest_station(
    State(state): State<AppState>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<Json<NearestStationResponse>, AppError> {
    query.validate()?;
    let controller = StationController::new(state.fleet.clone());
    let response = controller.nearest(query.lat, query.lon).await?;
    Ok(Json(response))
}

async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<StationId>,
) -> Result<Json<StationResponse>, AppError> {
    let controller = StationController::new(state.fleet.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationResponse>>, AppError> {
    let controller = StationController::new(state.fleet.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

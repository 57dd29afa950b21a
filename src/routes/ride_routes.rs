use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::ride_controller::RideController;
use crate::dto::api_response::ApiResponse;
use crate::dto::ride_dto::{
    EndRideRequest, RegisterUserRequest, RideReceiptResponse, RideResponse, StartRideRequest,
    UpdatePaymentRequest, UserResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_user))
        .route("/:id", get(get_user))
        .route("/:id/payment", put(update_payment))
        .route("/:id/ride", get(get_active_ride))
}

pub fn create_ride_router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_ride))
        .route("/end", post(end_ride))
}

async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let controller = RideController::new(state.fleet.clone());
    let response = controller.register_user(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = RideController::new(state.fleet.clone());
    let response = controller.get_user(&id).await?;
    Ok(Json(response))
}

async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = RideController::new(state.fleet.clone());
    let response = controller.update_payment(&id, request).await?;
    Ok(Json(response))
}

async fn get_active_ride(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RideResponse>, AppError> {
    let controller = RideController::new(state.fleet.clone());
    let response = controller.active_ride(&id).await?;
    Ok(Json(response))
}

async fn start_ride(
    State(state): State<AppState>,
    Json(request): Json<StartRideRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RideResponse>>), AppError> {
    let controller = RideController::new(state.fleet.clone());
    let response = controller.start_ride(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn end_ride(
    State(state): State<AppState>,
    Json(request): Json<EndRideRequest>,
) -> Result<Json<ApiResponse<RideReceiptResponse>>, AppError> {
    let controller = RideController::new(state.fleet.clone());
    let response = controller.end_ride(request).await?;
    Ok(Json(response))
}

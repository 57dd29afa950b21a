//! Error handling
//!
//! `FleetError` is the engine's closed set of failure kinds. `AppError` wraps it
//! together with the request-layer failures and converts everything into an
//! HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Failure kinds produced by the fleet engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Vehicle unavailable: {0}")]
    VehicleUnavailable(String),

    #[error("Ride in progress: {0}")]
    RideInProgress(String),

    #[error("No active ride: {0}")]
    NoActiveRide(String),

    #[error("No vehicle available: {0}")]
    NoVehicleAvailable(String),

    #[error("Payment error: {0}")]
    PaymentError(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl FleetError {
    /// Stable code for the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            FleetError::NotFound(_) => "NOT_FOUND",
            FleetError::Conflict(_) => "CONFLICT",
            FleetError::CapacityExceeded(_) => "CAPACITY_EXCEEDED",
            FleetError::VehicleUnavailable(_) => "VEHICLE_UNAVAILABLE",
            FleetError::RideInProgress(_) => "RIDE_IN_PROGRESS",
            FleetError::NoActiveRide(_) => "NO_ACTIVE_RIDE",
            FleetError::NoVehicleAvailable(_) => "NO_VEHICLE_AVAILABLE",
            FleetError::PaymentError(_) => "PAYMENT_ERROR",
            FleetError::InvalidState(_) => "INVALID_STATE",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            FleetError::NotFound(_) => StatusCode::NOT_FOUND,
            FleetError::NoVehicleAvailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            FleetError::PaymentError(_) => StatusCode::PAYMENT_REQUIRED,
            FleetError::Conflict(_)
            | FleetError::CapacityExceeded(_)
            | FleetError::VehicleUnavailable(_)
            | FleetError::RideInProgress(_)
            | FleetError::NoActiveRide(_)
            | FleetError::InvalidState(_) => StatusCode::CONFLICT,
        }
    }
}

/// Errors surfaced by the request layer
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Error body returned by the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Fleet(e) => {
                tracing::warn!("Fleet operation rejected: {}", e);
                (
                    e.status_code(),
                    ErrorResponse {
                        error: "Fleet Error".to_string(),
                        message: e.to_string(),
                        details: None,
                        code: e.kind().to_string(),
                    },
                )
            }

            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(serde_json::json!({ "sql_error": e.to_string() })),
                        code: "DB_ERROR".to_string(),
                    },
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(serde_json::json!(e)),
                        code: "VALIDATION_ERROR".to_string(),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Typed result for request-layer operations
pub type AppResult<T> = Result<T, AppError>;

/// Typed result for engine operations
pub type FleetResult<T> = Result<T, FleetError>;

pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> FleetError {
    FleetError::NotFound(format!("{} with id '{}' not found", resource, id))
}

pub fn conflict_error(resource: &str, id: impl std::fmt::Display) -> FleetError {
    FleetError::Conflict(format!("{} with id '{}' already exists", resource, id))
}

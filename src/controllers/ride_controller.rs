use std::sync::Arc;

use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::ride_dto::{
    EndRideRequest, RegisterUserRequest, RideReceiptResponse, RideResponse, StartRideRequest,
    UpdatePaymentRequest, UserResponse,
};
use crate::services::FleetManager;
use crate::utils::errors::AppError;

/// Users and their rides
pub struct RideController {
    fleet: Arc<FleetManager>,
}

impl RideController {
    pub fn new(fleet: Arc<FleetManager>) -> Self {
        Self { fleet }
    }

    pub async fn register_user(
        &self,
        request: RegisterUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let user = self
            .fleet
            .register_user(request.user_id.trim(), &request.payment_token)
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "User registered".to_string(),
        ))
    }

    pub async fn update_payment(
        &self,
        user_id: &str,
        request: UpdatePaymentRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let user = self
            .fleet
            .update_payment_token(user_id, request.payment_token.trim())
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Payment method updated".to_string(),
        ))
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let user = self.fleet.user(user_id).await?;
        Ok(user.into())
    }

    pub async fn start_ride(
        &self,
        request: StartRideRequest,
    ) -> Result<ApiResponse<RideResponse>, AppError> {
        request.validate()?;

        let ride = self
            .fleet
            .start_ride(&request.user_id, request.lat, request.lon)
            .await?;

        Ok(ApiResponse::success_with_message(
            ride.into(),
            "Ride started".to_string(),
        ))
    }

    pub async fn end_ride(
        &self,
        request: EndRideRequest,
    ) -> Result<ApiResponse<RideReceiptResponse>, AppError> {
        request.validate()?;

        let receipt = self
            .fleet
            .end_ride(
                &request.user_id,
                request.lat,
                request.lon,
                request.degraded_report,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            receipt.into(),
            "Ride ended".to_string(),
        ))
    }

    pub async fn active_ride(&self, user_id: &str) -> Result<RideResponse, AppError> {
        let ride = self.fleet.active_ride(user_id).await?;
        Ok(ride.into())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Ride, RideReceipt, StationId, User};
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(custom = "validate_not_blank")]
    pub user_id: String,

    /// May be empty; charging such a user fails later
    #[serde(default)]
    pub payment_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePaymentRequest {
    #[validate(custom = "validate_not_blank")]
    pub payment_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub has_payment_method: bool,
    pub current_ride_id: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            has_payment_method: user.has_payment_method(),
            id: user.id,
            current_ride_id: user.current_ride_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct StartRideRequest {
    #[validate(custom = "validate_not_blank")]
    pub user_id: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EndRideRequest {
    #[validate(custom = "validate_not_blank")]
    pub user_id: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    #[serde(default)]
    pub degraded_report: bool,
}

#[derive(Debug, Serialize)]
pub struct RideResponse {
    pub id: String,
    pub user_id: String,
    pub vehicle_id: String,
    pub started_at: DateTime<Utc>,
    pub docked_station_id: Option<StationId>,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            user_id: ride.user_id,
            vehicle_id: ride.vehicle_id,
            started_at: ride.started_at,
            docked_station_id: ride.docked_station_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RideReceiptResponse {
    pub ride_id: String,
    pub vehicle_id: String,
    pub station_id: StationId,
    pub degraded_report: bool,
    pub cost: u32,
}

impl From<RideReceipt> for RideReceiptResponse {
    fn from(receipt: RideReceipt) -> Self {
        Self {
            ride_id: receipt.ride.id,
            vehicle_id: receipt.ride.vehicle_id,
            station_id: receipt.station_id,
            degraded_report: receipt.ride.degraded_report,
            cost: receipt.cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_ride_request_validation() {
        let ok = StartRideRequest {
            user_id: "u1".to_string(),
            lat: 32.07,
            lon: 34.78,
        };
        assert!(ok.validate().is_ok());

        let bad = StartRideRequest {
            user_id: " ".to_string(),
            lat: 120.0,
            lon: 34.78,
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("user_id"));
        assert!(fields.contains_key("lat"));
    }

    #[test]
    fn test_end_ride_request_defaults_degraded_report() {
        let request: EndRideRequest =
            serde_json::from_str(r#"{"user_id":"u1","lat":1.0,"lon":2.0}"#).unwrap();
        assert!(!request.degraded_report);
    }
}

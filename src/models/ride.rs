//! Ride model
//!
//! A ride lives from a successful rent until the user has been charged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::station::StationId;
use crate::models::user::UserId;
use crate::models::vehicle::VehicleId;

pub type RideId = String;

/// Fare for a normal ride, in whole currency units
pub const RIDE_FARE: u32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ride {
    pub id: RideId,
    pub user_id: UserId,
    pub vehicle_id: VehicleId,
    pub degraded_report: bool,
    pub started_at: DateTime<Utc>,
    /// Set once the vehicle is docked; a ride still open with this set is
    /// waiting on a successful charge.
    pub docked_station_id: Option<StationId>,
    pub cost: Option<u32>,
}

impl Ride {
    pub fn new(user_id: impl Into<UserId>, vehicle_id: impl Into<VehicleId>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            vehicle_id: vehicle_id.into(),
            degraded_report: false,
            started_at,
            docked_station_id: None,
            cost: None,
        }
    }

    /// Reported breakdowns ride for free
    pub fn calculate_cost(&self) -> u32 {
        if self.degraded_report {
            0
        } else {
            RIDE_FARE
        }
    }

    pub fn is_docked(&self) -> bool {
        self.docked_station_id.is_some()
    }
}

/// Outcome of a completed ride
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RideReceipt {
    pub ride: Ride,
    pub station_id: StationId,
    pub cost: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_rules() {
        let mut ride = Ride::new("u1", "V1", Utc::now());
        assert_eq!(ride.calculate_cost(), 15);

        ride.degraded_report = true;
        assert_eq!(ride.calculate_cost(), 0);
    }

    #[test]
    fn test_rides_get_distinct_ids() {
        let now = Utc::now();
        let a = Ride::new("u1", "V1", now);
        let b = Ride::new("u1", "V1", now);
        assert_ne!(a.id, b.id);
        assert!(!a.is_docked());
    }
}

use serde::{Deserialize, Serialize};

use crate::models::{StationId, Vehicle};

/// Filters for listing vehicles
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    pub station_id: Option<StationId>,
}

#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub vehicle_type: String,
    pub station_id: Option<StationId>,
    pub status: String,
    pub rides_since_treatment: u32,
    pub last_treated_date: Option<String>,
    pub battery_level: Option<u8>,
    pub rentable: bool,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        use crate::models::Rentable;

        Self {
            rentable: vehicle.is_rentable(),
            vehicle_type: vehicle.kind.type_tag().to_string(),
            battery_level: vehicle.battery_level(),
            status: vehicle.status.to_string(),
            last_treated_date: vehicle.last_treated_date.map(|date| date.to_rfc3339()),
            station_id: vehicle.station_id,
            rides_since_treatment: vehicle.rides_since_treatment,
            id: vehicle.id,
        }
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Station, StationId};

/// `?lat=..&lon=..` query
#[derive(Debug, Deserialize, Validate)]
pub struct CoordinatesQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct StationResponse {
    pub id: StationId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub max_capacity: u32,
    pub free_spots: usize,
    pub vehicle_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NearestStationResponse {
    #[serde(flatten)]
    pub station: StationResponse,
    /// Squared planar distance to the queried point
    pub distance: f64,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.id,
            free_spots: station.free_spots(),
            vehicle_ids: station.vehicle_ids().to_vec(),
            name: station.name,
            lat: station.lat,
            lon: station.lon,
            max_capacity: station.max_capacity,
        }
    }
}

impl NearestStationResponse {
    pub fn new(station: Station, lat: f64, lon: f64) -> Self {
        let distance = station.squared_distance_to(lat, lon);
        Self {
            station: station.into(),
            distance,
        }
    }
}

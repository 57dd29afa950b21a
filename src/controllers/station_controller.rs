use std::sync::Arc;

use crate::dto::station_dto::{NearestStationResponse, StationResponse};
use crate::models::StationId;
use crate::services::FleetManager;
use crate::utils::errors::AppError;

pub struct StationController {
    fleet: Arc<FleetManager>,
}

impl StationController {
    pub fn new(fleet: Arc<FleetManager>) -> Self {
        Self { fleet }
    }

    pub async fn nearest(&self, lat: f64, lon: f64) -> Result<NearestStationResponse, AppError> {
        let station = self.fleet.nearest_station(lat, lon).await?;
        Ok(NearestStationResponse::new(station, lat, lon))
    }

    pub async fn get_by_id(&self, station_id: StationId) -> Result<StationResponse, AppError> {
        let station = self.fleet.station(station_id).await?;
        Ok(station.into())
    }

    pub async fn list(&self) -> Result<Vec<StationResponse>, AppError> {
        let stations = self.fleet.stations().await;
        Ok(stations.into_iter().map(StationResponse::from).collect())
    }
}

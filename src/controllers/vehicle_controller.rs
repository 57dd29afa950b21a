use std::sync::Arc;

use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{VehicleFilters, VehicleResponse};
use crate::services::FleetManager;
use crate::utils::errors::AppError;

pub struct VehicleController {
    fleet: Arc<FleetManager>,
}

impl VehicleController {
    pub fn new(fleet: Arc<FleetManager>) -> Self {
        Self { fleet }
    }

    pub async fn get_by_id(&self, vehicle_id: &str) -> Result<VehicleResponse, AppError> {
        let vehicle = self.fleet.vehicle(vehicle_id).await?;
        Ok(vehicle.into())
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.fleet.vehicles(filters.station_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn charge(&self, vehicle_id: &str) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.fleet.charge_vehicle(vehicle_id).await?;
        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle charged".to_string(),
        ))
    }
}

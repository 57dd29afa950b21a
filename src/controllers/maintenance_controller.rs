use std::sync::Arc;

use chrono::Utc;

use crate::dto::maintenance_dto::TreatVehiclesResponse;
use crate::services::{FleetManager, FleetStats};
use crate::utils::errors::AppError;

pub struct MaintenanceController {
    fleet: Arc<FleetManager>,
}

impl MaintenanceController {
    pub fn new(fleet: Arc<FleetManager>) -> Self {
        Self { fleet }
    }

    pub async fn treat_vehicles(&self) -> Result<TreatVehiclesResponse, AppError> {
        let treated_at = Utc::now();
        let treated = self.fleet.treat_vehicles(treated_at).await;
        Ok(TreatVehiclesResponse { treated_at, treated })
    }

    pub async fn stats(&self) -> Result<FleetStats, AppError> {
        Ok(self.fleet.stats().await)
    }
}

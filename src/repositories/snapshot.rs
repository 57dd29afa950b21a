//! Start-up snapshot
//!
//! The engine is seeded once from station and vehicle rows. Where they come
//! from is behind `SnapshotSource`.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use crate::repositories::station_repository::{StationRepository, StationRow};
use crate::repositories::vehicle_repository::{VehicleRepository, VehicleRow};
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetSnapshot {
    pub stations: Vec<StationRow>,
    pub vehicles: Vec<VehicleRow>,
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load(&self) -> AppResult<FleetSnapshot>;
}

/// Static snapshot, handy for tests and fixtures
#[async_trait]
impl SnapshotSource for FleetSnapshot {
    async fn load(&self) -> AppResult<FleetSnapshot> {
        Ok(self.clone())
    }
}

pub struct DatabaseSnapshotSource {
    stations: StationRepository,
    vehicles: VehicleRepository,
}

impl DatabaseSnapshotSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            stations: StationRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }
}

#[async_trait]
impl SnapshotSource for DatabaseSnapshotSource {
    async fn load(&self) -> AppResult<FleetSnapshot> {
        let stations = self.stations.list_all().await?;
        let vehicles = self.vehicles.list_all().await?;

        info!(
            "📥 Snapshot loaded: {} stations, {} vehicles",
            stations.len(),
            vehicles.len()
        );

        Ok(FleetSnapshot { stations, vehicles })
    }
}

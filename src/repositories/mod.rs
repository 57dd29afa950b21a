//! Repositories
//!
//! Read and seed access to the station and vehicle tables.

pub mod snapshot;
pub mod station_repository;
pub mod vehicle_repository;

pub use snapshot::{DatabaseSnapshotSource, FleetSnapshot, SnapshotSource};
pub use station_repository::{StationRepository, StationRow};
pub use vehicle_repository::{VehicleRepository, VehicleRow};

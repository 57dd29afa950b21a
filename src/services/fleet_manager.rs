//! Fleet manager
//!
//! The single entry point to fleet state. Every operation takes the fleet
//! lock once, runs to completion on `FleetState` and releases the lock on
//! every exit path, so operations are linearised in lock-acquisition order.
//! A caller that gives up while waiting simply drops its lock future; a
//! caller that holds the lock never awaits anything else.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::{Ride, RideReceipt, Station, StationId, User, Vehicle, VehicleId};
use crate::repositories::snapshot::{FleetSnapshot, SnapshotSource};
use crate::services::fleet_state::{FleetState, FleetStats};
use crate::services::payment_service::PaymentGateway;
use crate::services::vehicle_factory::VehicleFactory;
use crate::utils::errors::{AppResult, FleetError, FleetResult};

pub struct FleetManager {
    state: Mutex<FleetState>,
    payments: Arc<dyn PaymentGateway>,
}

impl FleetManager {
    /// Empty fleet
    pub fn new(payments: Arc<dyn PaymentGateway>) -> Self {
        Self {
            state: Mutex::new(FleetState::default()),
            payments,
        }
    }

    /// Builds the registries from store rows. Vehicles are docked in
    /// ascending id order; any row breaking a fleet invariant aborts the load.
    pub fn from_snapshot(snapshot: FleetSnapshot, payments: Arc<dyn PaymentGateway>) -> FleetResult<Self> {
        let mut state = FleetState::default();

        for row in snapshot.stations {
            let max_capacity = u32::try_from(row.max_capacity).map_err(|_| {
                FleetError::InvalidState(format!(
                    "station {} has an invalid capacity ({})",
                    row.station_id, row.max_capacity
                ))
            })?;
            state.insert_station(Station::new(row.station_id, row.name, row.lat, row.lon, max_capacity))?;
        }

        let mut vehicles = snapshot
            .vehicles
            .iter()
            .map(VehicleFactory::from_row)
            .collect::<FleetResult<Vec<_>>>()?;
        vehicles.sort_by(|a, b| a.id.cmp(&b.id));
        for vehicle in vehicles {
            state.insert_vehicle(vehicle)?;
        }

        let stats = state.stats();
        info!(
            "🚦 Fleet ready: {} stations, {} vehicles ({} available, {} degraded)",
            stats.stations, stats.vehicles, stats.available_vehicles, stats.degraded_vehicles
        );

        Ok(Self {
            state: Mutex::new(state),
            payments,
        })
    }

    pub async fn load(source: &dyn SnapshotSource, payments: Arc<dyn PaymentGateway>) -> AppResult<Self> {
        let snapshot = source.load().await?;
        Ok(Self::from_snapshot(snapshot, payments)?)
    }

    pub async fn add_station(&self, station: Station) -> FleetResult<()> {
        let mut state = self.state.lock().await;
        state.insert_station(station)
    }

    pub async fn add_vehicle(&self, vehicle: Vehicle) -> FleetResult<()> {
        let mut state = self.state.lock().await;
        state.insert_vehicle(vehicle)
    }

    pub async fn register_user(&self, user_id: &str, payment_token: &str) -> FleetResult<User> {
        let mut state = self.state.lock().await;
        state.register_user(user_id, payment_token)
    }

    /// Swaps the user's payment token; an open ride left unpaid can then be
    /// settled by calling `end_ride` again
    pub async fn update_payment_token(&self, user_id: &str, payment_token: &str) -> FleetResult<User> {
        let mut state = self.state.lock().await;
        state.update_payment_token(user_id, payment_token)
    }

    pub async fn nearest_station(&self, lat: f64, lon: f64) -> FleetResult<Station> {
        let state = self.state.lock().await;
        state.nearest_station(lat, lon).cloned()
    }

    /// Rents the lowest-id rentable vehicle at the nearest station that has one
    pub async fn start_ride(&self, user_id: &str, lat: f64, lon: f64) -> FleetResult<Ride> {
        let mut state = self.state.lock().await;
        let result = state.start_ride(user_id, lat, lon, Utc::now());
        if let Err(e) = &result {
            warn!("start_ride rejected for user '{}': {}", user_id, e);
        }
        result
    }

    /// Docks the ride's vehicle at the nearest station and charges the user.
    /// On `PaymentError` the docking stays and the ride remains open; calling
    /// again retries only the charge.
    pub async fn end_ride(
        &self,
        user_id: &str,
        lat: f64,
        lon: f64,
        degraded_report: bool,
    ) -> FleetResult<RideReceipt> {
        let mut state = self.state.lock().await;
        let result = state.end_ride(user_id, lat, lon, degraded_report, self.payments.as_ref());
        if let Err(e) = &result {
            warn!("end_ride rejected for user '{}': {}", user_id, e);
        }
        result
    }

    pub async fn treat_vehicles(&self, now: DateTime<Utc>) -> Vec<VehicleId> {
        let mut state = self.state.lock().await;
        state.treat_vehicles(now)
    }

    pub async fn charge_vehicle(&self, vehicle_id: &str) -> FleetResult<Vehicle> {
        let mut state = self.state.lock().await;
        state.charge_vehicle(vehicle_id)
    }

    pub async fn station(&self, station_id: StationId) -> FleetResult<Station> {
        self.state.lock().await.station(station_id)
    }

    pub async fn stations(&self) -> Vec<Station> {
        self.state.lock().await.stations()
    }

    pub async fn vehicle(&self, vehicle_id: &str) -> FleetResult<Vehicle> {
        self.state.lock().await.vehicle(vehicle_id)
    }

    pub async fn vehicles(&self, station_id: Option<StationId>) -> FleetResult<Vec<Vehicle>> {
        self.state.lock().await.vehicles(station_id)
    }

    pub async fn user(&self, user_id: &str) -> FleetResult<User> {
        self.state.lock().await.user(user_id)
    }

    pub async fn active_ride(&self, user_id: &str) -> FleetResult<Ride> {
        self.state.lock().await.active_ride(user_id)
    }

    pub async fn active_rides(&self) -> Vec<Ride> {
        self.state.lock().await.active_rides()
    }

    pub async fn stats(&self) -> FleetStats {
        self.state.lock().await.stats()
    }

    pub async fn verify_invariants(&self) -> FleetResult<()> {
        self.state.lock().await.verify_invariants()
    }
}

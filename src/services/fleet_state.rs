//! Fleet registries and the transitions over them
//!
//! `FleetState` owns every station, vehicle, user and open ride, addressed by
//! id. It is not synchronised itself: `FleetManager` keeps it behind a single
//! lock and every method here runs inside one acquisition.
//!
//! Precondition failures return before anything is mutated. Once a
//! transition starts committing, each step stays applied even if a later one
//! fails; the only step that can fail that late is the charge at the end of
//! `end_ride`, and the ride is then kept open with its docking recorded.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::models::{
    Chargeable, Dockable, Rentable, Ride, RideId, RideReceipt, Station, StationId, Treatable,
    User, UserId, Vehicle, VehicleId, VehicleStatus, FULL_BATTERY,
};
use crate::services::payment_service::PaymentGateway;
use crate::utils::errors::{conflict_error, not_found_error, FleetError, FleetResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    pub stations: usize,
    pub vehicles: usize,
    pub available_vehicles: usize,
    pub rented_vehicles: usize,
    pub degraded_vehicles: usize,
    pub users: usize,
    pub active_rides: usize,
}

#[derive(Debug, Default)]
pub struct FleetState {
    stations: BTreeMap<StationId, Station>,
    vehicles: BTreeMap<VehicleId, Vehicle>,
    users: HashMap<UserId, User>,
    rides: HashMap<RideId, Ride>,
}

fn check_coordinates(lat: f64, lon: f64) -> FleetResult<()> {
    if lat.is_finite() && lon.is_finite() {
        Ok(())
    } else {
        Err(FleetError::InvalidState(format!(
            "coordinates ({}, {}) are not finite",
            lat, lon
        )))
    }
}

impl FleetState {
    // ---- seeding ---------------------------------------------------------

    /// Registers an empty station
    pub fn insert_station(&mut self, station: Station) -> FleetResult<()> {
        if self.stations.contains_key(&station.id) {
            return Err(conflict_error("Station", station.id));
        }
        if station.max_capacity == 0 {
            return Err(FleetError::InvalidState(format!(
                "station {} must have a positive capacity",
                station.id
            )));
        }
        if !station.vehicle_ids().is_empty() {
            return Err(FleetError::InvalidState(format!(
                "station {} must be registered empty",
                station.id
            )));
        }
        check_coordinates(station.lat, station.lon)?;

        debug!("Station {} '{}' registered", station.id, station.name);
        self.stations.insert(station.id, station);
        Ok(())
    }

    /// Registers a vehicle and docks it at the station it names
    pub fn insert_vehicle(&mut self, vehicle: Vehicle) -> FleetResult<()> {
        if self.vehicles.contains_key(&vehicle.id) {
            return Err(conflict_error("Vehicle", &vehicle.id));
        }
        if vehicle.battery_level().map_or(false, |level| level > FULL_BATTERY) {
            return Err(FleetError::InvalidState(format!(
                "vehicle '{}' reports a battery above {}",
                vehicle.id, FULL_BATTERY
            )));
        }

        match (vehicle.status, vehicle.station_id) {
            (VehicleStatus::Rented, Some(station_id)) => {
                return Err(FleetError::InvalidState(format!(
                    "rented vehicle '{}' cannot be docked at station {}",
                    vehicle.id, station_id
                )));
            }
            (VehicleStatus::Rented, None) => {
                return Err(FleetError::InvalidState(format!(
                    "vehicle '{}' cannot be registered as rented without an open ride",
                    vehicle.id
                )));
            }
            (status, None) => {
                return Err(FleetError::InvalidState(format!(
                    "{} vehicle '{}' must be docked at a station",
                    status, vehicle.id
                )));
            }
            (_, Some(station_id)) => {
                let station = self
                    .stations
                    .get_mut(&station_id)
                    .ok_or_else(|| not_found_error("Station", station_id))?;
                station.add_vehicle(vehicle.id.clone())?;
            }
        }

        self.vehicles.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    // ---- users -----------------------------------------------------------

    pub fn register_user(&mut self, user_id: &str, payment_token: &str) -> FleetResult<User> {
        if user_id.trim().is_empty() {
            return Err(FleetError::InvalidState("user id must not be blank".to_string()));
        }
        if self.users.contains_key(user_id) {
            return Err(conflict_error("User", user_id));
        }

        let user = User::new(user_id, payment_token);
        self.users.insert(user.id.clone(), user.clone());
        info!("👤 User '{}' registered", user_id);
        Ok(user)
    }

    /// Replaces the user's payment token. Allowed mid-ride, so a ride whose
    /// charge failed can be settled by the next `end_ride`.
    pub fn update_payment_token(&mut self, user_id: &str, payment_token: &str) -> FleetResult<User> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| not_found_error("User", user_id))?;
        user.payment_token = payment_token.to_string();
        info!("💳 Payment method updated for user '{}'", user_id);
        Ok(user.clone())
    }

    // ---- station search --------------------------------------------------

    /// Closest station by squared planar distance, lowest id on ties
    pub fn nearest_station(&self, lat: f64, lon: f64) -> FleetResult<&Station> {
        check_coordinates(lat, lon)?;

        let mut best: Option<(&Station, f64)> = None;
        for station in self.stations.values() {
            let distance = station.squared_distance_to(lat, lon);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((station, distance)),
            }
        }

        best.map(|(station, _)| station)
            .ok_or_else(|| FleetError::NotFound("no stations registered".to_string()))
    }

    /// Every station ordered by distance, then by id
    fn stations_by_distance(&self, lat: f64, lon: f64) -> Vec<&Station> {
        let mut ranked: Vec<(&Station, f64)> = self
            .stations
            .values()
            .map(|station| (station, station.squared_distance_to(lat, lon)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.id.cmp(&b.0.id)));
        ranked.into_iter().map(|(station, _)| station).collect()
    }

    /// Nearest station holding a rentable vehicle, and its lowest-id rentable vehicle
    fn select_vehicle(&self, lat: f64, lon: f64) -> Option<(StationId, VehicleId)> {
        for station in self.stations_by_distance(lat, lon) {
            let candidate = station
                .vehicle_ids()
                .iter()
                .filter(|id| {
                    self.vehicles
                        .get(id.as_str())
                        .map_or(false, |vehicle| vehicle.is_rentable())
                })
                .min();

            if let Some(vehicle_id) = candidate {
                return Some((station.id, vehicle_id.clone()));
            }
        }
        None
    }

    // ---- rides -----------------------------------------------------------

    pub fn start_ride(
        &mut self,
        user_id: &str,
        lat: f64,
        lon: f64,
        now: DateTime<Utc>,
    ) -> FleetResult<Ride> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| not_found_error("User", user_id))?;
        if !user.can_start_ride() {
            return Err(FleetError::RideInProgress(format!(
                "user '{}' already has ride '{}' open",
                user_id,
                user.current_ride_id.as_deref().unwrap_or_default()
            )));
        }
        check_coordinates(lat, lon)?;

        let (station_id, vehicle_id) = self.select_vehicle(lat, lon).ok_or_else(|| {
            FleetError::NoVehicleAvailable(format!(
                "no rentable vehicle at any station for ({}, {})",
                lat, lon
            ))
        })?;

        let vehicle = self
            .vehicles
            .get_mut(&vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id))?;
        vehicle.rent()?;

        let station = self
            .stations
            .get_mut(&station_id)
            .ok_or_else(|| not_found_error("Station", station_id))?;
        station.remove_vehicle(&vehicle_id)?;

        let ride = Ride::new(user_id, vehicle_id.clone(), now);
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| not_found_error("User", user_id))?;
        user.current_ride_id = Some(ride.id.clone());
        self.rides.insert(ride.id.clone(), ride.clone());

        info!(
            "🚲 Ride '{}' started: user '{}' took vehicle '{}' from station {}",
            ride.id, user_id, vehicle_id, station_id
        );
        Ok(ride)
    }

    pub fn end_ride(
        &mut self,
        user_id: &str,
        lat: f64,
        lon: f64,
        degraded_report: bool,
        payments: &dyn PaymentGateway,
    ) -> FleetResult<RideReceipt> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| not_found_error("User", user_id))?;
        let ride_id = user.current_ride_id.clone().ok_or_else(|| {
            FleetError::NoActiveRide(format!("user '{}' has no open ride", user_id))
        })?;
        check_coordinates(lat, lon)?;
        let payment_token = user.payment_token.clone();

        let ride = self
            .rides
            .get(&ride_id)
            .ok_or_else(|| not_found_error("Ride", &ride_id))?;

        let (station_id, cost) = match (ride.docked_station_id, ride.cost) {
            (Some(station_id), Some(cost)) => {
                info!(
                    "Ride '{}' already docked at station {}, retrying the charge",
                    ride_id, station_id
                );
                (station_id, cost)
            }
            _ => self.dock_ride_vehicle(&ride_id, lat, lon, degraded_report)?,
        };

        // A failed charge leaves the docking in place and the ride open.
        payments.charge(user_id, &payment_token, cost)?;

        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| not_found_error("User", user_id))?;
        user.current_ride_id = None;
        let ride = self
            .rides
            .remove(&ride_id)
            .ok_or_else(|| not_found_error("Ride", &ride_id))?;

        info!(
            "🏁 Ride '{}' ended at station {}: user '{}' charged {}",
            ride.id, station_id, user_id, cost
        );
        Ok(RideReceipt {
            ride,
            station_id,
            cost,
        })
    }

    /// Docks the ride's vehicle at the station nearest to (lat, lon) and
    /// records the outcome on the ride
    fn dock_ride_vehicle(
        &mut self,
        ride_id: &str,
        lat: f64,
        lon: f64,
        degraded_report: bool,
    ) -> FleetResult<(StationId, u32)> {
        let vehicle_id = self
            .rides
            .get(ride_id)
            .ok_or_else(|| not_found_error("Ride", ride_id))?
            .vehicle_id
            .clone();
        let vehicle = self
            .vehicles
            .get(&vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id))?;
        if vehicle.status != VehicleStatus::Rented {
            return Err(FleetError::InvalidState(format!(
                "vehicle '{}' of ride '{}' is {} rather than rented",
                vehicle_id, ride_id, vehicle.status
            )));
        }

        let station = self.nearest_station(lat, lon)?;
        let station_id = station.id;
        if !station.has_free_spot() {
            return Err(FleetError::CapacityExceeded(format!(
                "station {} has no free spot for vehicle '{}'",
                station_id, vehicle_id
            )));
        }

        let vehicle = self
            .vehicles
            .get_mut(&vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id))?;
        vehicle.rides_since_treatment += 1;
        vehicle.return_to(station_id);
        if degraded_report {
            vehicle.report_degraded();
        }
        let status = vehicle.status;

        let station = self
            .stations
            .get_mut(&station_id)
            .ok_or_else(|| not_found_error("Station", station_id))?;
        station.add_vehicle(vehicle_id.clone())?;

        let ride = self
            .rides
            .get_mut(ride_id)
            .ok_or_else(|| not_found_error("Ride", ride_id))?;
        ride.degraded_report = degraded_report;
        ride.docked_station_id = Some(station_id);
        let cost = ride.calculate_cost();
        ride.cost = Some(cost);

        info!(
            "🅿️  Vehicle '{}' docked at station {} ({})",
            vehicle_id, station_id, status
        );
        Ok((station_id, cost))
    }

    // ---- maintenance -----------------------------------------------------

    /// Treats every degraded vehicle, returns their ids in ascending order
    pub fn treat_vehicles(&mut self, now: DateTime<Utc>) -> Vec<VehicleId> {
        let treated: Vec<VehicleId> = self
            .vehicles
            .values_mut()
            .filter(|vehicle| vehicle.status == VehicleStatus::Degraded)
            .map(|vehicle| {
                vehicle.treat(now);
                vehicle.id.clone()
            })
            .collect();

        if treated.is_empty() {
            debug!("Maintenance sweep found no degraded vehicles");
        } else {
            info!("🔧 Maintenance sweep treated {} vehicles", treated.len());
        }
        treated
    }

    pub fn charge_vehicle(&mut self, vehicle_id: &str) -> FleetResult<Vehicle> {
        let vehicle = self
            .vehicles
            .get_mut(vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;
        vehicle.charge()?;
        info!("🔋 Vehicle '{}' charged", vehicle_id);
        Ok(vehicle.clone())
    }

    // ---- views -----------------------------------------------------------

    pub fn station(&self, station_id: StationId) -> FleetResult<Station> {
        self.stations
            .get(&station_id)
            .cloned()
            .ok_or_else(|| not_found_error("Station", station_id))
    }

    pub fn stations(&self) -> Vec<Station> {
        self.stations.values().cloned().collect()
    }

    pub fn vehicle(&self, vehicle_id: &str) -> FleetResult<Vehicle> {
        self.vehicles
            .get(vehicle_id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))
    }

    /// All vehicles, or those docked at `station_id`, in ascending id order
    pub fn vehicles(&self, station_id: Option<StationId>) -> FleetResult<Vec<Vehicle>> {
        match station_id {
            None => Ok(self.vehicles.values().cloned().collect()),
            Some(station_id) => {
                if !self.stations.contains_key(&station_id) {
                    return Err(not_found_error("Station", station_id));
                }
                Ok(self
                    .vehicles
                    .values()
                    .filter(|vehicle| vehicle.station_id == Some(station_id))
                    .cloned()
                    .collect())
            }
        }
    }

    pub fn user(&self, user_id: &str) -> FleetResult<User> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| not_found_error("User", user_id))
    }

    pub fn active_ride(&self, user_id: &str) -> FleetResult<Ride> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| not_found_error("User", user_id))?;
        let ride_id = user.current_ride_id.as_ref().ok_or_else(|| {
            FleetError::NoActiveRide(format!("user '{}' has no open ride", user_id))
        })?;
        self.rides
            .get(ride_id)
            .cloned()
            .ok_or_else(|| not_found_error("Ride", ride_id))
    }

    /// Open rides, oldest first
    pub fn active_rides(&self) -> Vec<Ride> {
        let mut rides: Vec<Ride> = self.rides.values().cloned().collect();
        rides.sort_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.id.cmp(&b.id)));
        rides
    }

    pub fn stats(&self) -> FleetStats {
        let count = |status: VehicleStatus| {
            self.vehicles
                .values()
                .filter(|vehicle| vehicle.status == status)
                .count()
        };
        FleetStats {
            stations: self.stations.len(),
            vehicles: self.vehicles.len(),
            available_vehicles: count(VehicleStatus::Available),
            rented_vehicles: count(VehicleStatus::Rented),
            degraded_vehicles: count(VehicleStatus::Degraded),
            users: self.users.len(),
            active_rides: self.rides.len(),
        }
    }

    // ---- audit -----------------------------------------------------------

    /// Checks the cross-registry invariants, reporting the first violation
    pub fn verify_invariants(&self) -> FleetResult<()> {
        let violation = |message: String| -> FleetResult<()> { Err(FleetError::InvalidState(message)) };
        let mut docked: HashMap<&str, StationId> = HashMap::new();

        for station in self.stations.values() {
            if station.vehicle_ids().len() > station.max_capacity as usize {
                return violation(format!("station {} is over capacity", station.id));
            }
            for vehicle_id in station.vehicle_ids() {
                if let Some(other) = docked.insert(vehicle_id.as_str(), station.id) {
                    return violation(format!(
                        "vehicle '{}' is docked at stations {} and {}",
                        vehicle_id, other, station.id
                    ));
                }
                match self.vehicles.get(vehicle_id) {
                    None => {
                        return violation(format!(
                            "station {} lists unknown vehicle '{}'",
                            station.id, vehicle_id
                        ))
                    }
                    Some(vehicle) if vehicle.station_id != Some(station.id) => {
                        return violation(format!(
                            "vehicle '{}' is listed at station {} but points to {:?}",
                            vehicle_id, station.id, vehicle.station_id
                        ))
                    }
                    Some(_) => {}
                }
            }
        }

        for vehicle in self.vehicles.values() {
            let is_rented = vehicle.status == VehicleStatus::Rented;
            if is_rented == vehicle.station_id.is_some() {
                return violation(format!(
                    "vehicle '{}' is {} with station {:?}",
                    vehicle.id, vehicle.status, vehicle.station_id
                ));
            }
            if !is_rented && !docked.contains_key(vehicle.id.as_str()) {
                return violation(format!(
                    "vehicle '{}' is not listed at its station",
                    vehicle.id
                ));
            }
        }

        for user in self.users.values() {
            if let Some(ride_id) = &user.current_ride_id {
                match self.rides.get(ride_id) {
                    Some(ride) if ride.user_id == user.id => {}
                    _ => {
                        return violation(format!(
                            "user '{}' points to a ride that is not theirs",
                            user.id
                        ))
                    }
                }
            }
        }

        for ride in self.rides.values() {
            let owner = self.users.get(&ride.user_id);
            if owner.and_then(|user| user.current_ride_id.as_ref()) != Some(&ride.id) {
                return violation(format!(
                    "ride '{}' is not the current ride of user '{}'",
                    ride.id, ride.user_id
                ));
            }
            if !ride.is_docked() {
                let rented = self
                    .vehicles
                    .get(&ride.vehicle_id)
                    .map_or(false, |vehicle| vehicle.status == VehicleStatus::Rented);
                if !rented {
                    return violation(format!(
                        "vehicle '{}' of undocked ride '{}' is not rented",
                        ride.vehicle_id, ride.id
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleKind;
    use crate::services::payment_service::TokenPaymentGateway;

    fn fleet() -> FleetState {
        let mut state = FleetState::default();
        state.insert_station(Station::new(1, "North", 1.0, 0.0, 2)).unwrap();
        state.insert_station(Station::new(2, "South", -1.0, 0.0, 2)).unwrap();
        state.insert_station(Station::new(3, "Far", 10.0, 10.0, 5)).unwrap();
        state
    }

    fn bicycle(id: &str, station_id: StationId) -> Vehicle {
        Vehicle::new(id, VehicleKind::Bicycle, station_id)
    }

    #[test]
    fn test_nearest_station_breaks_ties_by_lowest_id() {
        let state = fleet();
        assert_eq!(state.nearest_station(0.0, 0.0).unwrap().id, 1);
        assert_eq!(state.nearest_station(-0.9, 0.0).unwrap().id, 2);
        assert_eq!(state.nearest_station(9.0, 9.0).unwrap().id, 3);
    }

    #[test]
    fn test_nearest_station_without_stations() {
        let state = FleetState::default();
        assert!(matches!(state.nearest_station(0.0, 0.0), Err(FleetError::NotFound(_))));
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let mut state = fleet();
        let payments = TokenPaymentGateway::new();
        assert!(state.nearest_station(f64::NAN, 0.0).is_err());

        // Unknown users are reported before the coordinates are looked at
        assert!(matches!(
            state.start_ride("ghost", f64::NAN, 0.0, Utc::now()),
            Err(FleetError::NotFound(_))
        ));
        assert!(matches!(
            state.end_ride("ghost", f64::NAN, 0.0, false, &payments),
            Err(FleetError::NotFound(_))
        ));

        state.register_user("u1", "tok").unwrap();
        assert!(matches!(
            state.end_ride("u1", f64::INFINITY, 0.0, false, &payments),
            Err(FleetError::NoActiveRide(_))
        ));
        assert!(matches!(
            state.start_ride("u1", f64::NAN, 0.0, Utc::now()),
            Err(FleetError::InvalidState(_))
        ));
    }

    #[test]
    fn test_update_payment_token() {
        let mut state = fleet();
        state.register_user("u1", "").unwrap();
        assert!(state.update_payment_token("u1", "tok_visa").unwrap().has_payment_method());
        assert_eq!(state.user("u1").unwrap().payment_token, "tok_visa");
        assert!(matches!(
            state.update_payment_token("ghost", "tok"),
            Err(FleetError::NotFound(_))
        ));
    }

    #[test]
    fn test_insert_vehicle_validates_placement() {
        let mut state = fleet();
        state.insert_vehicle(bicycle("V1", 1)).unwrap();
        assert!(matches!(state.insert_vehicle(bicycle("V1", 2)), Err(FleetError::Conflict(_))));
        assert!(matches!(state.insert_vehicle(bicycle("V2", 9)), Err(FleetError::NotFound(_))));

        let mut rented = bicycle("V3", 1);
        rented.status = VehicleStatus::Rented;
        assert!(matches!(state.insert_vehicle(rented), Err(FleetError::InvalidState(_))));

        let mut loose = bicycle("V3", 1);
        loose.status = VehicleStatus::Rented;
        loose.station_id = None;
        assert!(matches!(state.insert_vehicle(loose), Err(FleetError::InvalidState(_))));
        assert_eq!(state.stats().rented_vehicles, 0);

        state.insert_vehicle(bicycle("V4", 1)).unwrap();
        assert!(matches!(
            state.insert_vehicle(bicycle("V5", 1)),
            Err(FleetError::CapacityExceeded(_))
        ));
        state.verify_invariants().unwrap();
    }

    #[test]
    fn test_selection_skips_stations_without_rentable_vehicles() {
        let mut state = fleet();
        let mut tired = bicycle("A1", 1);
        tired.rides_since_treatment = 7;
        state.insert_vehicle(tired).unwrap();
        state.insert_vehicle(bicycle("B2", 2)).unwrap();
        state.insert_vehicle(bicycle("B1", 2)).unwrap();

        assert_eq!(state.select_vehicle(0.9, 0.0), Some((2, "B1".to_string())));
    }

    #[test]
    fn test_start_and_end_ride() {
        let mut state = fleet();
        let payments = TokenPaymentGateway::new();
        state.insert_vehicle(bicycle("V1", 1)).unwrap();
        state.register_user("u1", "tok").unwrap();

        let ride = state.start_ride("u1", 1.0, 0.0, Utc::now()).unwrap();
        assert_eq!(ride.vehicle_id, "V1");
        assert!(matches!(
            state.start_ride("u1", 1.0, 0.0, Utc::now()),
            Err(FleetError::RideInProgress(_))
        ));
        state.verify_invariants().unwrap();

        let receipt = state.end_ride("u1", -1.0, 0.0, false, &payments).unwrap();
        assert_eq!(receipt.station_id, 2);
        assert_eq!(receipt.cost, 15);
        assert_eq!(state.vehicle("V1").unwrap().rides_since_treatment, 1);
        assert!(state.user("u1").unwrap().current_ride_id.is_none());
        state.verify_invariants().unwrap();
    }

    #[test]
    fn test_failed_charge_keeps_ride_open_and_retry_does_not_redock() {
        let mut state = fleet();
        let payments = TokenPaymentGateway::new();
        state.insert_vehicle(bicycle("V1", 1)).unwrap();
        state.register_user("u1", "").unwrap();
        state.start_ride("u1", 1.0, 0.0, Utc::now()).unwrap();

        let err = state.end_ride("u1", -1.0, 0.0, false, &payments).unwrap_err();
        assert!(matches!(err, FleetError::PaymentError(_)));

        let ride = state.active_ride("u1").unwrap();
        assert_eq!(ride.docked_station_id, Some(2));
        let vehicle = state.vehicle("V1").unwrap();
        assert_eq!(vehicle.station_id, Some(2));
        assert_eq!(vehicle.rides_since_treatment, 1);
        state.verify_invariants().unwrap();

        // The retry only charges
        state.update_payment_token("u1", "tok").unwrap();
        let receipt = state.end_ride("u1", 10.0, 10.0, true, &payments).unwrap();
        assert_eq!(receipt.station_id, 2);
        assert_eq!(receipt.cost, 15);
        assert_eq!(state.vehicle("V1").unwrap().rides_since_treatment, 1);
        assert_eq!(state.station(2).unwrap().vehicle_ids().len(), 1);
        state.verify_invariants().unwrap();
    }

    #[test]
    fn test_full_destination_leaves_ride_untouched() {
        let mut state = fleet();
        let payments = TokenPaymentGateway::new();
        state.insert_vehicle(bicycle("V1", 1)).unwrap();
        state.insert_vehicle(bicycle("V2", 2)).unwrap();
        state.insert_vehicle(bicycle("V3", 2)).unwrap();
        state.register_user("u1", "tok").unwrap();
        state.start_ride("u1", 1.0, 0.0, Utc::now()).unwrap();

        let err = state.end_ride("u1", -1.0, 0.0, false, &payments).unwrap_err();
        assert!(matches!(err, FleetError::CapacityExceeded(_)));

        let vehicle = state.vehicle("V1").unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Rented);
        assert_eq!(vehicle.rides_since_treatment, 0);
        assert!(state.active_ride("u1").unwrap().docked_station_id.is_none());
        assert!(payments.charges().is_empty());
        state.verify_invariants().unwrap();
    }

    #[test]
    fn test_stats_counts_statuses() {
        let mut state = fleet();
        state.insert_vehicle(bicycle("V1", 1)).unwrap();
        let mut degraded = bicycle("V2", 3);
        degraded.status = VehicleStatus::Degraded;
        state.insert_vehicle(degraded).unwrap();
        state.register_user("u1", "tok").unwrap();
        state.start_ride("u1", 1.0, 0.0, Utc::now()).unwrap();

        let stats = state.stats();
        assert_eq!(stats.stations, 3);
        assert_eq!(stats.vehicles, 2);
        assert_eq!(stats.rented_vehicles, 1);
        assert_eq!(stats.degraded_vehicles, 1);
        assert_eq!(stats.available_vehicles, 0);
        assert_eq!(stats.active_rides, 1);
    }

    #[test]
    fn test_vehicles_filter_by_station() {
        let mut state = fleet();
        state.insert_vehicle(bicycle("V2", 1)).unwrap();
        state.insert_vehicle(bicycle("V1", 1)).unwrap();
        state.insert_vehicle(bicycle("V3", 2)).unwrap();

        let ids: Vec<_> = state
            .vehicles(Some(1))
            .unwrap()
            .into_iter()
            .map(|vehicle| vehicle.id)
            .collect();
        assert_eq!(ids, vec!["V1", "V2"]);
        assert_eq!(state.vehicles(None).unwrap().len(), 3);
        assert!(state.vehicles(Some(42)).is_err());
    }
}

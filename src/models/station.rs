//! Station model
//!
//! A docking station holds an ordered list of vehicle identifiers, never more
//! than `max_capacity` of them.

use serde::{Deserialize, Serialize};

use crate::models::vehicle::VehicleId;
use crate::utils::errors::{FleetError, FleetResult};

pub type StationId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub max_capacity: u32,
    vehicle_ids: Vec<VehicleId>,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>, lat: f64, lon: f64, max_capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lon,
            max_capacity,
            vehicle_ids: Vec::new(),
        }
    }

    pub fn vehicle_ids(&self) -> &[VehicleId] {
        &self.vehicle_ids
    }

    pub fn has_free_spot(&self) -> bool {
        self.vehicle_ids.len() < self.max_capacity as usize
    }

    /// True when any vehicle is docked, rentable or not
    pub fn has_available_vehicle(&self) -> bool {
        !self.vehicle_ids.is_empty()
    }

    pub fn free_spots(&self) -> usize {
        (self.max_capacity as usize).saturating_sub(self.vehicle_ids.len())
    }

    pub fn contains(&self, vehicle_id: &str) -> bool {
        self.vehicle_ids.iter().any(|id| id == vehicle_id)
    }

    /// Appends a vehicle. A second copy of an identifier already docked here is
    /// rejected with `Conflict`.
    pub fn add_vehicle(&mut self, vehicle_id: impl Into<VehicleId>) -> FleetResult<()> {
        let vehicle_id = vehicle_id.into();
        if !self.has_free_spot() {
            return Err(FleetError::CapacityExceeded(format!(
                "station {} is full ({} / {})",
                self.id,
                self.vehicle_ids.len(),
                self.max_capacity
            )));
        }
        if self.contains(&vehicle_id) {
            return Err(FleetError::Conflict(format!(
                "vehicle '{}' is already docked at station {}",
                vehicle_id, self.id
            )));
        }
        self.vehicle_ids.push(vehicle_id);
        Ok(())
    }

    pub fn remove_vehicle(&mut self, vehicle_id: &str) -> FleetResult<()> {
        let position = self
            .vehicle_ids
            .iter()
            .position(|id| id == vehicle_id)
            .ok_or_else(|| {
                FleetError::NotFound(format!(
                    "vehicle '{}' is not docked at station {}",
                    vehicle_id, self.id
                ))
            })?;
        self.vehicle_ids.remove(position);
        Ok(())
    }

    /// Squared planar distance. Not geodesic: stations are close enough
    /// together for the approximation to keep the ordering.
    pub fn squared_distance_to(&self, lat: f64, lon: f64) -> f64 {
        let d_lat = self.lat - lat;
        let d_lon = self.lon - lon;
        d_lat * d_lat + d_lon * d_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_enforced() {
        let mut station = Station::new(1, "Dizengoff", 32.08, 34.77, 2);
        station.add_vehicle("V1").unwrap();
        station.add_vehicle("V2").unwrap();
        assert!(!station.has_free_spot());

        let err = station.add_vehicle("V3").unwrap_err();
        assert!(matches!(err, FleetError::CapacityExceeded(_)));
        assert_eq!(station.vehicle_ids().len(), 2);
    }

    #[test]
    fn test_duplicate_vehicle_is_rejected() {
        let mut station = Station::new(1, "Rabin Square", 32.08, 34.78, 5);
        station.add_vehicle("V1").unwrap();
        assert!(matches!(station.add_vehicle("V1"), Err(FleetError::Conflict(_))));
        assert_eq!(station.vehicle_ids(), ["V1".to_string()]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut station = Station::new(1, "Habima", 32.07, 34.78, 5);
        for id in ["V1", "V2", "V3"] {
            station.add_vehicle(id).unwrap();
        }
        station.remove_vehicle("V2").unwrap();
        assert_eq!(station.vehicle_ids(), ["V1".to_string(), "V3".to_string()]);

        assert!(matches!(station.remove_vehicle("V2"), Err(FleetError::NotFound(_))));
    }

    #[test]
    fn test_has_available_vehicle_counts_presence() {
        let mut station = Station::new(1, "Carmel Market", 32.06, 34.76, 1);
        assert!(!station.has_available_vehicle());
        station.add_vehicle("V1").unwrap();
        assert!(station.has_available_vehicle());
        assert_eq!(station.free_spots(), 0);
    }

    #[test]
    fn test_squared_distance() {
        let station = Station::new(1, "Origin", 0.0, 0.0, 1);
        assert_eq!(station.squared_distance_to(3.0, 4.0), 25.0);
    }
}

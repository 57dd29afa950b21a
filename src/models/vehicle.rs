//! Vehicle model
//!
//! A vehicle is a tagged variant: the shared lifecycle fields live on
//! `Vehicle`, the kind-specific state (battery) lives on `VehicleKind`.
//! Behaviour is split across the capability traits below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::station::StationId;
use crate::utils::errors::{FleetError, FleetResult};

pub type VehicleId = String;

/// Rides allowed before a vehicle must go through treatment
pub const MAX_RIDES_BEFORE_TREATMENT: u32 = 7;

/// Electric vehicles need strictly more than this to be rented
pub const MIN_RENTABLE_BATTERY: u8 = 20;

pub const FULL_BATTERY: u8 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Rented,
    Degraded,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Degraded => "degraded",
        }
    }

    pub fn parse(value: &str) -> FleetResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(VehicleStatus::Available),
            "rented" => Ok(VehicleStatus::Rented),
            "degraded" => Ok(VehicleStatus::Degraded),
            other => Err(FleetError::InvalidState(format!(
                "unknown vehicle status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "vehicle_type", rename_all = "snake_case")]
pub enum VehicleKind {
    Bicycle,
    ElectricBicycle { battery_level: u8 },
    Scooter { battery_level: u8 },
}

impl VehicleKind {
    pub fn type_tag(&self) -> &'static str {
        match self {
            VehicleKind::Bicycle => "bicycle",
            VehicleKind::ElectricBicycle { .. } => "electric_bicycle",
            VehicleKind::Scooter { .. } => "scooter",
        }
    }

    pub fn is_electric(&self) -> bool {
        !matches!(self, VehicleKind::Bicycle)
    }

    pub fn battery_level(&self) -> Option<u8> {
        match self {
            VehicleKind::Bicycle => None,
            VehicleKind::ElectricBicycle { battery_level } | VehicleKind::Scooter { battery_level } => {
                Some(*battery_level)
            }
        }
    }

    fn battery_level_mut(&mut self) -> Option<&mut u8> {
        match self {
            VehicleKind::Bicycle => None,
            VehicleKind::ElectricBicycle { battery_level } | VehicleKind::Scooter { battery_level } => {
                Some(battery_level)
            }
        }
    }
}

/// Can be taken out of a station by a user
pub trait Rentable {
    fn is_rentable(&self) -> bool;
    fn rent(&mut self) -> FleetResult<()>;
}

/// Can be placed back into a station
pub trait Dockable {
    fn return_to(&mut self, station_id: StationId);
    fn report_degraded(&mut self);
}

pub trait Treatable {
    fn treat(&mut self, now: DateTime<Utc>);
}

/// Battery capability, only meaningful for electric kinds
pub trait Chargeable {
    fn charge(&mut self) -> FleetResult<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(flatten)]
    pub kind: VehicleKind,
    pub station_id: Option<StationId>,
    pub status: VehicleStatus,
    pub rides_since_treatment: u32,
    pub last_treated_date: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// New vehicle docked at `station_id`, available and freshly counted
    pub fn new(id: impl Into<VehicleId>, kind: VehicleKind, station_id: StationId) -> Self {
        Self {
            id: id.into(),
            kind,
            station_id: Some(station_id),
            status: VehicleStatus::Available,
            rides_since_treatment: 0,
            last_treated_date: None,
        }
    }

    pub fn battery_level(&self) -> Option<u8> {
        self.kind.battery_level()
    }

    pub fn needs_treatment(&self) -> bool {
        self.rides_since_treatment >= MAX_RIDES_BEFORE_TREATMENT
    }
}

impl Rentable for Vehicle {
    fn is_rentable(&self) -> bool {
        if self.status != VehicleStatus::Available || self.needs_treatment() {
            return false;
        }
        match self.kind.battery_level() {
            Some(level) => level > MIN_RENTABLE_BATTERY,
            None => true,
        }
    }

    fn rent(&mut self) -> FleetResult<()> {
        if !self.is_rentable() {
            return Err(FleetError::VehicleUnavailable(format!(
                "vehicle '{}' cannot be rented (status: {}, rides since treatment: {}, battery: {:?})",
                self.id,
                self.status,
                self.rides_since_treatment,
                self.battery_level()
            )));
        }
        self.status = VehicleStatus::Rented;
        self.station_id = None;
        Ok(())
    }
}

impl Dockable for Vehicle {
    fn return_to(&mut self, station_id: StationId) {
        self.station_id = Some(station_id);
        self.status = if self.needs_treatment() {
            VehicleStatus::Degraded
        } else {
            VehicleStatus::Available
        };
    }

    fn report_degraded(&mut self) {
        self.status = VehicleStatus::Degraded;
    }
}

impl Treatable for Vehicle {
    fn treat(&mut self, now: DateTime<Utc>) {
        self.status = VehicleStatus::Available;
        self.rides_since_treatment = 0;
        self.last_treated_date = Some(now);
        if let Some(level) = self.kind.battery_level_mut() {
            *level = FULL_BATTERY;
        }
    }
}

impl Chargeable for Vehicle {
    fn charge(&mut self) -> FleetResult<()> {
        if self.status != VehicleStatus::Available {
            return Err(FleetError::InvalidState(format!(
                "vehicle '{}' must be available to charge (status: {})",
                self.id, self.status
            )));
        }
        let id = &self.id;
        match self.kind.battery_level_mut() {
            Some(level) => {
                *level = FULL_BATTERY;
                Ok(())
            }
            None => Err(FleetError::InvalidState(format!(
                "vehicle '{}' has no battery to charge",
                id
            ))),
        }
    }
}

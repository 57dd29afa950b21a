//! Vehicle factory
//!
//! Builds typed vehicles from the text tags used by the store.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{StationId, Vehicle, VehicleId, VehicleKind, VehicleStatus, FULL_BATTERY};
use crate::repositories::vehicle_repository::VehicleRow;
use crate::utils::errors::{FleetError, FleetResult};

pub struct VehicleFactory;

impl VehicleFactory {
    /// Maps a type tag to a kind. Electric kinds take `battery_level`, or a
    /// full battery when none is given.
    pub fn kind_from_tag(type_tag: &str, battery_level: Option<u8>) -> FleetResult<VehicleKind> {
        let battery_level = battery_level.unwrap_or(FULL_BATTERY).min(FULL_BATTERY);
        match type_tag.trim().to_ascii_lowercase().as_str() {
            "bicycle" | "bike" => Ok(VehicleKind::Bicycle),
            "electric_bicycle" | "electric bicycle" | "ebike" | "e-bike" => {
                Ok(VehicleKind::ElectricBicycle { battery_level })
            }
            "scooter" | "electric_scooter" => Ok(VehicleKind::Scooter { battery_level }),
            other => Err(FleetError::InvalidState(format!(
                "unknown vehicle type '{}'",
                other
            ))),
        }
    }

    /// Fresh vehicle, available and docked at `station_id`
    pub fn create(
        type_tag: &str,
        id: impl Into<VehicleId>,
        station_id: StationId,
    ) -> FleetResult<Vehicle> {
        let kind = Self::kind_from_tag(type_tag, None)?;
        Ok(Vehicle::new(id, kind, station_id))
    }

    /// Restores a vehicle from its stored row
    pub fn from_row(row: &VehicleRow) -> FleetResult<Vehicle> {
        let battery_level = row
            .battery_level
            .map(|level| level.clamp(0, FULL_BATTERY as i64) as u8);
        let kind = Self::kind_from_tag(&row.vehicle_type, battery_level)?;
        let status = VehicleStatus::parse(&row.status)?;

        let rides_since_treatment = u32::try_from(row.rides_since_last_treated).map_err(|_| {
            FleetError::InvalidState(format!(
                "vehicle '{}' has a ride counter out of range ({})",
                row.vehicle_id, row.rides_since_last_treated
            ))
        })?;

        let last_treated_date = match row.last_treated_date.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(parse_treated_date(&row.vehicle_id, value)?),
            _ => None,
        };

        Ok(Vehicle {
            id: row.vehicle_id.clone(),
            kind,
            station_id: row.station_id,
            status,
            rides_since_treatment,
            last_treated_date,
        })
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (taken as midnight UTC)
fn parse_treated_date(vehicle_id: &str, value: &str) -> FleetResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            FleetError::InvalidState(format!(
                "vehicle '{}' has an unreadable treatment date '{}'",
                vehicle_id, value
            ))
        })
}

//! Domain models
//!
//! Stations, vehicles, users and rides as held in the fleet registries.

pub mod ride;
pub mod station;
pub mod user;
pub mod vehicle;

pub use ride::{Ride, RideId, RideReceipt, RIDE_FARE};
pub use station::{Station, StationId};
pub use user::{User, UserId};
pub use vehicle::{
    Chargeable, Dockable, Rentable, Treatable, Vehicle, VehicleId, VehicleKind, VehicleStatus,
    FULL_BATTERY, MAX_RIDES_BEFORE_TREATMENT, MIN_RENTABLE_BATTERY,
};

//! Controllers
//!
//! Translate validated requests into fleet operations and fleet results into
//! response DTOs.

pub mod maintenance_controller;
pub mod ride_controller;
pub mod station_controller;
pub mod vehicle_controller;

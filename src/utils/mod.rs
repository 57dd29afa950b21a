//! Utilities
//!
//! Error types and request validation helpers.

pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult, FleetError, FleetResult};

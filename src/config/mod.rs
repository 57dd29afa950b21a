//! Configuration
//!
//! Database and process settings.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::*;

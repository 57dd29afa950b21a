//! Database module
//!
//! Connection and schema of the store the fleet is seeded from.

pub mod connection;
pub mod schema;

pub use connection::DatabaseConnection;

//! Services module
//!
//! The fleet engine itself (`FleetManager` over `FleetState`) and the
//! collaborators it is built from: the vehicle factory and the payment
//! gateway.

pub mod fleet_manager;
pub mod fleet_state;
pub mod payment_service;
pub mod vehicle_factory;

pub use fleet_manager::FleetManager;
pub use fleet_state::FleetStats;
pub use payment_service::{ChargeRecord, PaymentGateway, TokenPaymentGateway};
pub use vehicle_factory::VehicleFactory;

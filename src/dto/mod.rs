//! Request and response shapes of the HTTP layer

pub mod api_response;
pub mod maintenance_dto;
pub mod ride_dto;
pub mod station_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;

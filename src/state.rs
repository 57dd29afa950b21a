//! Shared application state
//!
//! Handed to every Axum handler through the router.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::FleetManager;

#[derive(Clone)]
pub struct AppState {
    pub fleet: Arc<FleetManager>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(fleet: Arc<FleetManager>, config: EnvironmentConfig) -> Self {
        Self { fleet, config }
    }
}

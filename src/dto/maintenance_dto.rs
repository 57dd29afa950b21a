use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TreatVehiclesResponse {
    pub treated_at: DateTime<Utc>,
    pub treated: Vec<String>,
}

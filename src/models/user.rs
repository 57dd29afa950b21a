//! User model

use serde::{Deserialize, Serialize};

use crate::models::ride::RideId;

pub type UserId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    #[serde(skip_serializing)]
    pub payment_token: String,
    pub current_ride_id: Option<RideId>,
}

impl User {
    pub fn new(id: impl Into<UserId>, payment_token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payment_token: payment_token.into(),
            current_ride_id: None,
        }
    }

    pub fn can_start_ride(&self) -> bool {
        self.current_ride_id.is_none()
    }

    pub fn has_payment_method(&self) -> bool {
        !self.payment_token.trim().is_empty()
    }
}

//! Payment collaborator
//!
//! Charging is an opaque side effect: it either succeeds or fails. It runs
//! while the fleet lock is held, so implementations must not block on I/O.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use tracing::info;

use crate::utils::errors::{FleetError, FleetResult};

pub trait PaymentGateway: Send + Sync {
    fn charge(&self, user_id: &str, payment_token: &str, amount: u32) -> FleetResult<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeRecord {
    pub user_id: String,
    pub amount: u32,
    pub charged_at: DateTime<Utc>,
}

/// Accepts any non-blank token and keeps a ledger of what was charged
#[derive(Debug, Default)]
pub struct TokenPaymentGateway {
    ledger: Mutex<Vec<ChargeRecord>>,
}

impl TokenPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charges(&self) -> Vec<ChargeRecord> {
        self.ledger
            .lock()
            .map(|ledger| ledger.clone())
            .unwrap_or_default()
    }

    pub fn total_charged(&self, user_id: &str) -> u32 {
        self.charges()
            .iter()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.amount)
            .sum()
    }
}

impl PaymentGateway for TokenPaymentGateway {
    fn charge(&self, user_id: &str, payment_token: &str, amount: u32) -> FleetResult<()> {
        if payment_token.trim().is_empty() {
            return Err(FleetError::PaymentError(format!(
                "no payment token registered for user '{}'",
                user_id
            )));
        }

        info!("💳 Charged user '{}' {} units", user_id, amount);

        if let Ok(mut ledger) = self.ledger.lock() {
            ledger.push(ChargeRecord {
                user_id: user_id.to_string(),
                amount,
                charged_at: Utc::now(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_records_amount() {
        let gateway = TokenPaymentGateway::new();
        gateway.charge("u1", "tok_visa", 15).unwrap();
        gateway.charge("u1", "tok_visa", 0).unwrap();
        gateway.charge("u2", "tok_amex", 15).unwrap();

        assert_eq!(gateway.charges().len(), 3);
        assert_eq!(gateway.total_charged("u1"), 15);
    }

    #[test]
    fn test_blank_token_fails() {
        let gateway = TokenPaymentGateway::new();
        let err = gateway.charge("u1", "  ", 15).unwrap_err();
        assert!(matches!(err, FleetError::PaymentError(_)));
        assert!(gateway.charges().is_empty());
    }
}

//! Ledger-specific errors.

use harvest_types::Timestamp;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("insufficient principal: requested {requested}, staked {available}")]
    InsufficientPrincipal { requested: u128, available: u128 },

    #[error("no reward available to claim")]
    NoRewardAvailable,

    #[error("asset transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("clock regression: now {now} precedes last settlement {last_settled_at}")]
    ClockRegression {
        last_settled_at: Timestamp,
        now: Timestamp,
    },

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(#[from] harvest_store::StoreError),
}

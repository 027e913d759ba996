//! The accrual ledger — the core of the harvest protocol.
//!
//! Tracks one [`Position`] per participant, accrues time-proportional
//! reward at a fixed annual rate, and funnels every operation through one
//! settlement primitive so no balance change can observe stale accrual.
//!
//! This crate handles:
//! - Reward settlement (folding elapsed time into accrued reward)
//! - Deposit / withdraw / claim with all-or-nothing semantics
//! - Pending-reward preview with arithmetic identical to settlement
//! - Persistence through the abstract [`harvest_store::PositionStore`]

pub mod engine;
pub mod error;
pub mod event;
pub mod position;
pub mod transfer;

pub use engine::AccrualLedger;
pub use error::LedgerError;
pub use event::{EventBus, LedgerEvent};
pub use position::Position;
pub use transfer::{AssetTransfer, TransferError};

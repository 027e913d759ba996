//! Fundamental types for the harvest staking ledger.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: participant identities, timestamps, the clock seam, and the
//! staking parameters.

pub mod participant;
pub mod params;
pub mod time;

pub use participant::ParticipantId;
pub use params::{StakingParams, BPS_DENOMINATOR};
pub use time::{Clock, SystemClock, Timestamp};

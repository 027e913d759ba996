//! The harvest service — thin operation surface over the accrual ledger.
//!
//! Resolves caller identity and the current time from the environment,
//! serialises access to the ledger, and logs every operation. All real
//! design content lives in `harvest-ledger`; this crate is wiring.

pub mod config;
pub mod error;
pub mod logging;
pub mod service;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use logging::{init_logging, LogFormat};
pub use service::StakingService;

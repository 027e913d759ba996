//! Abstract storage traits for the harvest staking ledger.
//!
//! Persistence mechanics live outside the core: any backend (embedded
//! key-value store, SQL, in-memory for testing) implements these traits
//! and the rest of the workspace depends only on them.

pub mod error;
pub mod position;

pub use error::StoreError;
pub use position::PositionStore;

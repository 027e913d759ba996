//! Staking parameters — fixed at ledger construction, immutable thereafter.

use serde::{Deserialize, Serialize};

/// Basis-point denominator: 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Parameters governing reward accrual.
///
/// The accrual formula is pure integer arithmetic:
/// `delta = principal × rate_bps × elapsed_secs / (seconds_per_year × 10_000)`
/// with the division truncating toward zero. Small positions over short
/// periods can round down to zero reward; that precision floor is part of
/// the contract, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingParams {
    /// Annual reward rate in basis points. Default: 1000 (10% per year).
    pub rate_bps: u32,

    /// Seconds in a reward year. Default: 31_536_000 (365 days).
    pub seconds_per_year: u64,
}

impl StakingParams {
    /// The intended live configuration: 10% per 365-day year.
    pub fn harvest_defaults() -> Self {
        Self {
            rate_bps: 1000,
            seconds_per_year: 365 * 24 * 3600,
        }
    }
}

impl Default for StakingParams {
    fn default() -> Self {
        Self::harvest_defaults()
    }
}

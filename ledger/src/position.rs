//! Per-participant staking position and the settlement arithmetic.

use crate::error::LedgerError;
use harvest_types::{StakingParams, Timestamp, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};

/// A participant's staking record.
///
/// Positions are independent: accrual depends only on this participant's
/// own principal and elapsed time, never on other positions or any global
/// pool. The ledger owns every position exclusively; nothing outside the
/// engine holds a mutable reference to one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Asset units currently staked. Equals cumulative deposits minus
    /// cumulative withdrawals; never negative.
    pub principal: u128,

    /// Reward computed but not yet paid out. Monotonically non-decreasing
    /// except when reset to 0 by a successful claim.
    pub accrued_reward: u128,

    /// The point up to which reward has been folded into `accrued_reward`.
    /// Advances monotonically; never exceeds the current time.
    pub last_settled_at: Timestamp,
}

impl Position {
    /// A fresh, empty position. Created implicitly on first access, so
    /// `created_at` is the timestamp of whichever operation touched the
    /// participant first.
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            principal: 0,
            accrued_reward: 0,
            last_settled_at: created_at,
        }
    }

    /// A dormant position is observably identical to no position at all
    /// and may be pruned without changing behavior.
    pub fn is_dormant(&self) -> bool {
        self.principal == 0 && self.accrued_reward == 0
    }

    /// Reward earned between `last_settled_at` and `now`, not yet folded
    /// into `accrued_reward`.
    ///
    /// `delta = principal × rate_bps × elapsed / (seconds_per_year × 10_000)`
    ///
    /// All arithmetic is u128 with checked multiplication; the division
    /// truncates toward zero. Small `principal × elapsed` products round
    /// down to zero reward — the documented precision floor.
    pub fn accrual_since_settlement(
        &self,
        params: &StakingParams,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        if now < self.last_settled_at {
            return Err(LedgerError::ClockRegression {
                last_settled_at: self.last_settled_at,
                now,
            });
        }
        let elapsed = now.as_secs() - self.last_settled_at.as_secs();
        if self.principal == 0 || elapsed == 0 {
            return Ok(0);
        }
        let numerator = self
            .principal
            .checked_mul(params.rate_bps as u128)
            .and_then(|n| n.checked_mul(elapsed as u128))
            .ok_or(LedgerError::Overflow)?;
        let denominator = (params.seconds_per_year as u128) * (BPS_DENOMINATOR as u128);
        Ok(numerator / denominator)
    }

    /// Fold elapsed time into `accrued_reward` and advance the settlement
    /// point to `now`.
    ///
    /// The settlement point advances even when `principal == 0`, so time
    /// spent unstaked is consumed with zero reward rather than preserved.
    /// Idempotent for a fixed `now`: the second call sees zero elapsed
    /// time and changes nothing.
    pub fn settle(&mut self, params: &StakingParams, now: Timestamp) -> Result<(), LedgerError> {
        let delta = self.accrual_since_settlement(params, now)?;
        self.accrued_reward = self
            .accrued_reward
            .checked_add(delta)
            .ok_or(LedgerError::Overflow)?;
        self.last_settled_at = now;
        Ok(())
    }

    /// What `accrued_reward` would be after settling at `now`, without
    /// mutating anything. Uses the exact settlement arithmetic so a
    /// preview is always consistent with a mutating call at the same
    /// timestamp.
    pub fn pending_reward(
        &self,
        params: &StakingParams,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        let delta = self.accrual_since_settlement(params, now)?;
        self.accrued_reward
            .checked_add(delta)
            .ok_or(LedgerError::Overflow)
    }
}

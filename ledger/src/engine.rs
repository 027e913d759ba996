//! The accrual ledger engine — settlement, balance accounting, payouts.

use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent};
use crate::position::Position;
use crate::transfer::AssetTransfer;
use harvest_store::StoreError;
use harvest_types::{ParticipantId, StakingParams, Timestamp};
use std::collections::HashMap;

/// The accrual ledger — owns every position, settles reward before any
/// balance change, and decides atomicity around the external transfer.
///
/// Every mutating operation follows the same shape:
/// 1. settle a staged copy of the position at `now`,
/// 2. apply the balance change to the staged copy,
/// 3. for outbound transfers, commit the debited copy *before* invoking
///    the transfer capability (a reentrant capability must never observe
///    the stale, larger balance),
/// 4. on transfer failure, restore the pre-operation snapshot so the
///    whole operation is all-or-nothing.
pub struct AccrualLedger {
    params: StakingParams,
    positions: HashMap<ParticipantId, Position>,
    events: EventBus,
}

impl AccrualLedger {
    pub fn new() -> Self {
        Self::with_params(StakingParams::default())
    }

    /// Create a ledger with explicit parameters. Parameters are fixed for
    /// the lifetime of the ledger.
    pub fn with_params(params: StakingParams) -> Self {
        Self {
            params,
            positions: HashMap::new(),
            events: EventBus::new(),
        }
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    /// Read a position, if the participant has one.
    pub fn position(&self, participant: &ParticipantId) -> Option<&Position> {
        self.positions.get(participant)
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Subscribe to ledger events. Listeners fire inline, after an
    /// operation fully commits.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// The participant's position settled at `now`, staged for mutation.
    /// Implicit creation: a participant touched for the first time gets a
    /// fresh position with `last_settled_at = now`.
    fn staged_position(
        &self,
        participant: &ParticipantId,
        now: Timestamp,
    ) -> Result<Position, LedgerError> {
        let mut position = self
            .positions
            .get(participant)
            .cloned()
            .unwrap_or_else(|| Position::new(now));
        position.settle(&self.params, now)?;
        Ok(position)
    }

    /// Stake `amount` for `participant`.
    ///
    /// Settlement runs first (it does not depend on the amount), but the
    /// principal is credited only after the inbound transfer succeeds —
    /// stake that was never received must never be credited. On any
    /// failure nothing is committed.
    pub fn deposit(
        &mut self,
        participant: &ParticipantId,
        amount: u128,
        now: Timestamp,
        transfer: &dyn AssetTransfer,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let mut position = self.staged_position(participant, now)?;
        transfer
            .transfer_in(participant, amount)
            .map_err(|e| LedgerError::TransferFailed {
                reason: e.to_string(),
            })?;
        position.principal = position
            .principal
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.positions.insert(participant.clone(), position);
        self.events.emit(&LedgerEvent::Deposited {
            participant: participant.clone(),
            amount,
        });
        Ok(())
    }

    /// Unstake `amount` and return it to `participant`.
    ///
    /// The debited position is committed before the outbound transfer
    /// runs; if the transfer fails the pre-operation snapshot is restored.
    pub fn withdraw(
        &mut self,
        participant: &ParticipantId,
        amount: u128,
        now: Timestamp,
        transfer: &dyn AssetTransfer,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let snapshot = self.positions.get(participant).cloned();
        let mut position = self.staged_position(participant, now)?;
        if amount > position.principal {
            return Err(LedgerError::InsufficientPrincipal {
                requested: amount,
                available: position.principal,
            });
        }
        position.principal -= amount;
        self.positions.insert(participant.clone(), position);

        if let Err(e) = transfer.transfer_out(participant, amount) {
            self.restore(participant, snapshot);
            return Err(LedgerError::TransferFailed {
                reason: e.to_string(),
            });
        }
        self.events.emit(&LedgerEvent::Withdrawn {
            participant: participant.clone(),
            amount,
        });
        Ok(())
    }

    /// Pay out the participant's accrued reward and reset it to zero.
    /// Returns the amount paid.
    ///
    /// The zeroed position is committed before the outbound transfer runs
    /// (same reentrancy discipline as [`AccrualLedger::withdraw`]); a
    /// failed transfer restores the snapshot.
    pub fn claim_reward(
        &mut self,
        participant: &ParticipantId,
        now: Timestamp,
        transfer: &dyn AssetTransfer,
    ) -> Result<u128, LedgerError> {
        let snapshot = self.positions.get(participant).cloned();
        let mut position = self.staged_position(participant, now)?;
        let reward = position.accrued_reward;
        if reward == 0 {
            return Err(LedgerError::NoRewardAvailable);
        }
        position.accrued_reward = 0;
        self.positions.insert(participant.clone(), position);

        if let Err(e) = transfer.transfer_out(participant, reward) {
            self.restore(participant, snapshot);
            return Err(LedgerError::TransferFailed {
                reason: e.to_string(),
            });
        }
        self.events.emit(&LedgerEvent::RewardClaimed {
            participant: participant.clone(),
            reward,
        });
        Ok(reward)
    }

    /// What a claim at `now` would pay, without mutating anything.
    /// A participant with no position has nothing pending.
    pub fn pending_reward(
        &self,
        participant: &ParticipantId,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        match self.positions.get(participant) {
            Some(position) => position.pending_reward(&self.params, now),
            None => Ok(0),
        }
    }

    /// Drop positions that are observably identical to no position at
    /// all. Explicit maintenance, never run implicitly.
    pub fn prune_dormant(&mut self) -> usize {
        let before = self.positions.len();
        self.positions.retain(|_, p| !p.is_dormant());
        before - self.positions.len()
    }

    fn restore(&mut self, participant: &ParticipantId, snapshot: Option<Position>) {
        match snapshot {
            Some(old) => {
                self.positions.insert(participant.clone(), old);
            }
            None => {
                self.positions.remove(participant);
            }
        }
    }
}

impl AccrualLedger {
    /// Persist all positions and the parameters to a position store.
    ///
    /// Reconciles rather than upserts: store entries for participants no
    /// longer tracked in memory (pruned or never restored) are deleted, so
    /// a later load cannot resurrect a stale snapshot.
    pub fn save_to_store(&self, store: &dyn harvest_store::PositionStore) -> Result<(), LedgerError> {
        let params_bytes = bincode::serialize(&self.params)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        store.put_meta(b"params", &params_bytes)?;

        for (participant, _) in store.iter_positions()? {
            if !self.positions.contains_key(&participant) {
                store.delete_position(&participant)?;
            }
        }

        for (participant, position) in &self.positions {
            let bytes = bincode::serialize(position)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            store.put_position(participant, &bytes)?;
        }
        Ok(())
    }

    /// Restore a ledger from a position store. A store with no saved
    /// parameters yields the default configuration.
    pub fn load_from_store(
        store: &dyn harvest_store::PositionStore,
    ) -> Result<Self, LedgerError> {
        let params = match store.get_meta(b"params")? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
            None => StakingParams::default(),
        };

        let mut positions = HashMap::new();
        for (participant, bytes) in store.iter_positions()? {
            let position: Position = bincode::deserialize(&bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            positions.insert(participant, position);
        }
        Ok(Self {
            params,
            positions,
            events: EventBus::new(),
        })
    }
}

impl Default for AccrualLedger {
    fn default() -> Self {
        Self::new()
    }
}

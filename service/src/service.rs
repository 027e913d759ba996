//! The staking service — resolves identity and time, delegates to the ledger.

use std::sync::{Arc, Mutex};

use harvest_ledger::{AccrualLedger, AssetTransfer, LedgerEvent};
use harvest_store::PositionStore;
use harvest_types::{Clock, ParticipantId};
use tracing::{info, warn};

use crate::{ServiceConfig, ServiceError};

/// Thin dispatch layer over the [`AccrualLedger`].
///
/// The ledger requires one logical writer at a time per position; this
/// layer serialises all access with a single mutex, which trivially
/// satisfies that. Operations on different participants could later be
/// sharded without touching ledger semantics.
pub struct StakingService {
    ledger: Mutex<AccrualLedger>,
    transfer: Arc<dyn AssetTransfer + Send + Sync>,
    clock: Arc<dyn Clock>,
}

impl StakingService {
    pub fn new(
        config: &ServiceConfig,
        transfer: Arc<dyn AssetTransfer + Send + Sync>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ServiceError> {
        config.validate()?;
        Ok(Self {
            ledger: Mutex::new(AccrualLedger::with_params(config.staking_params())),
            transfer,
            clock,
        })
    }

    /// Build a service around a ledger restored from storage.
    pub fn from_store(
        store: &dyn PositionStore,
        transfer: Arc<dyn AssetTransfer + Send + Sync>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ServiceError> {
        let ledger = AccrualLedger::load_from_store(store)?;
        Ok(Self {
            ledger: Mutex::new(ledger),
            transfer,
            clock,
        })
    }

    /// Stake `amount` for the calling participant.
    pub fn deposit(&self, caller: &ParticipantId, amount: u128) -> Result<(), ServiceError> {
        let now = self.clock.now();
        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        match ledger.deposit(caller, amount, now, self.transfer.as_ref()) {
            Ok(()) => {
                info!(participant = %caller, amount, %now, "deposit accepted");
                Ok(())
            }
            Err(e) => {
                warn!(participant = %caller, amount, %now, error = %e, "deposit rejected");
                Err(e.into())
            }
        }
    }

    /// Unstake `amount` for the calling participant.
    pub fn withdraw(&self, caller: &ParticipantId, amount: u128) -> Result<(), ServiceError> {
        let now = self.clock.now();
        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        match ledger.withdraw(caller, amount, now, self.transfer.as_ref()) {
            Ok(()) => {
                info!(participant = %caller, amount, %now, "withdrawal accepted");
                Ok(())
            }
            Err(e) => {
                warn!(participant = %caller, amount, %now, error = %e, "withdrawal rejected");
                Err(e.into())
            }
        }
    }

    /// Pay out the caller's accrued reward. Returns the amount paid.
    pub fn claim_reward(&self, caller: &ParticipantId) -> Result<u128, ServiceError> {
        let now = self.clock.now();
        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        match ledger.claim_reward(caller, now, self.transfer.as_ref()) {
            Ok(reward) => {
                info!(participant = %caller, reward, %now, "reward claimed");
                Ok(reward)
            }
            Err(e) => {
                warn!(participant = %caller, %now, error = %e, "claim rejected");
                Err(e.into())
            }
        }
    }

    /// What a claim would pay right now, without mutating anything.
    pub fn pending_reward(&self, participant: &ParticipantId) -> Result<u128, ServiceError> {
        let now = self.clock.now();
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        Ok(ledger.pending_reward(participant, now)?)
    }

    /// The participant's staked principal (0 if no position exists).
    pub fn principal(&self, participant: &ParticipantId) -> u128 {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        ledger.position(participant).map(|p| p.principal).unwrap_or(0)
    }

    /// Subscribe to ledger events.
    pub fn subscribe(&self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        ledger.subscribe(listener);
    }

    /// Persist the current ledger state.
    pub fn save_to_store(&self, store: &dyn PositionStore) -> Result<(), ServiceError> {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        Ok(ledger.save_to_store(store)?)
    }
}

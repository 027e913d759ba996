//! Nullable asset transfer — programmable success and failure.

use harvest_ledger::{AssetTransfer, TransferError};
use harvest_types::ParticipantId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// One recorded transfer request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferCall {
    In { from: ParticipantId, amount: u128 },
    Out { to: ParticipantId, amount: u128 },
}

/// An in-memory asset-transfer capability for testing.
///
/// Succeeds by default, records every call, and can be flipped to reject
/// inbound or outbound transfers to exercise rollback paths.
#[derive(Default)]
pub struct NullTransfer {
    reject_in: AtomicBool,
    reject_out: AtomicBool,
    calls: Mutex<Vec<TransferCall>>,
}

impl NullTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent inbound transfers fail.
    pub fn reject_inbound(&self, reject: bool) {
        self.reject_in.store(reject, Ordering::SeqCst);
    }

    /// Make subsequent outbound transfers fail.
    pub fn reject_outbound(&self, reject: bool) {
        self.reject_out.store(reject, Ordering::SeqCst);
    }

    /// Every transfer request received so far, in order.
    pub fn calls(&self) -> Vec<TransferCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl AssetTransfer for NullTransfer {
    fn transfer_in(&self, from: &ParticipantId, amount: u128) -> Result<(), TransferError> {
        self.calls.lock().unwrap().push(TransferCall::In {
            from: from.clone(),
            amount,
        });
        if self.reject_in.load(Ordering::SeqCst) {
            return Err(TransferError("inbound transfer rejected".into()));
        }
        Ok(())
    }

    fn transfer_out(&self, to: &ParticipantId, amount: u128) -> Result<(), TransferError> {
        self.calls.lock().unwrap().push(TransferCall::Out {
            to: to.clone(),
            amount,
        });
        if self.reject_out.load(Ordering::SeqCst) {
            return Err(TransferError("outbound transfer rejected".into()));
        }
        Ok(())
    }
}

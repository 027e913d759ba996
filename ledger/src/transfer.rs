//! The external asset-transfer capability.

use harvest_types::ParticipantId;
use thiserror::Error;

/// Failure reported by the asset-transfer capability.
///
/// The capability reports failure as a value rather than panicking, so
/// the ledger can make its atomicity decision from the result.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransferError(pub String);

/// Moves the underlying fungible asset in and out of ledger custody.
///
/// This is an external collaborator: the ledger never assumes a transfer
/// succeeds, and treats the implementation as capable of re-invoking the
/// ledger before returning in the worst case. That is why withdrawals and
/// claims debit the position before calling [`AssetTransfer::transfer_out`].
pub trait AssetTransfer {
    /// Move `amount` from the participant into ledger custody.
    fn transfer_in(&self, from: &ParticipantId, amount: u128) -> Result<(), TransferError>;

    /// Move `amount` from ledger custody to the participant.
    fn transfer_out(&self, to: &ParticipantId, amount: u128) -> Result<(), TransferError>;
}

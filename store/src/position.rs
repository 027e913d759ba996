use crate::StoreError;
use harvest_types::ParticipantId;

/// Store trait for persisting ledger positions to durable storage.
///
/// Values are opaque `Vec<u8>` so this crate does not depend on the
/// ledger crate (which would create a circular dependency). The ledger
/// serializes/deserializes its own position type.
pub trait PositionStore {
    fn get_position(&self, participant: &ParticipantId) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_position(&self, participant: &ParticipantId, bytes: &[u8]) -> Result<(), StoreError>;
    fn delete_position(&self, participant: &ParticipantId) -> Result<(), StoreError>;
    fn iter_positions(&self) -> Result<Vec<(ParticipantId, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}

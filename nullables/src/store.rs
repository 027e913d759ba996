//! Nullable store — thread-safe in-memory position storage for testing.

use harvest_store::{PositionStore, StoreError};
use harvest_types::ParticipantId;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory position store for testing.
#[derive(Default)]
pub struct NullPositionStore {
    positions: Mutex<HashMap<ParticipantId, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullPositionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionStore for NullPositionStore {
    fn get_position(&self, participant: &ParticipantId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.positions.lock().unwrap().get(participant).cloned())
    }

    fn put_position(&self, participant: &ParticipantId, bytes: &[u8]) -> Result<(), StoreError> {
        self.positions
            .lock()
            .unwrap()
            .insert(participant.clone(), bytes.to_vec());
        Ok(())
    }

    fn delete_position(&self, participant: &ParticipantId) -> Result<(), StoreError> {
        self.positions.lock().unwrap().remove(participant);
        Ok(())
    }

    fn iter_positions(&self) -> Result<Vec<(ParticipantId, Vec<u8>)>, StoreError> {
        Ok(self
            .positions
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta.lock().unwrap().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_roundtrip() {
        let store = NullPositionStore::new();
        let alice = ParticipantId::new("alice");

        assert!(store.get_position(&alice).unwrap().is_none());
        store.put_position(&alice, b"bytes").unwrap();
        assert_eq!(store.get_position(&alice).unwrap().unwrap(), b"bytes");
        assert_eq!(store.iter_positions().unwrap().len(), 1);
        store.delete_position(&alice).unwrap();
        assert!(store.get_position(&alice).unwrap().is_none());
    }

    #[test]
    fn meta_roundtrip() {
        let store = NullPositionStore::new();
        assert!(store.get_meta(b"params").unwrap().is_none());
        store.put_meta(b"params", b"v1").unwrap();
        assert_eq!(store.get_meta(b"params").unwrap().unwrap(), b"v1");
    }
}

//! The object store
//!
//! Every operation runs under the map shard lock for its key, so operations on
//! the same name are serialized and never observe a torn entry. Operations on
//! different names need no coordination.

use crate::entry::{ObjectEntry, ObjectState};
use bytes::Bytes;
use capstore_core::{Error, Result};
use dashmap::DashMap;
use tracing::debug;

/// Keyed registry of objects.
///
/// Constructed once and shared by reference (usually behind an `Arc`); there
/// is no process-wide instance.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: DashMap<String, ObjectEntry>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a complete object.
    ///
    /// Fails with `NotFound` when there is no record and with `Incomplete`
    /// when the object is only reserved.
    pub fn get(&self, name: &str) -> Result<Bytes> {
        match self.objects.get(name) {
            Some(entry) if entry.present => Ok(entry.value.clone()),
            Some(_) => Err(Error::incomplete(name)),
            None => Err(Error::not_found(name)),
        }
    }

    /// Reserve `name` with `payload`, replacing any previous entry.
    ///
    /// Re-reserving a complete object resets it to reserved.
    pub fn reserve(&self, name: &str, payload: impl Into<Bytes>) {
        let payload = payload.into();
        debug!(name, bytes = payload.len(), "Reserving object");
        self.objects
            .insert(name.to_string(), ObjectEntry::reserved(payload));
    }

    /// Mark a reserved object complete.
    ///
    /// Completing an already complete object is a no-op success.
    pub fn complete(&self, name: &str) -> Result<()> {
        match self.objects.get_mut(name) {
            Some(mut entry) => {
                entry.present = true;
                debug!(name, "Completed object");
                Ok(())
            }
            None => Err(Error::not_found(name)),
        }
    }

    /// Remove an object. Removing an absent name succeeds.
    pub fn remove(&self, name: &str) {
        if self.objects.remove(name).is_some() {
            debug!(name, "Removed object");
        }
    }

    /// Lifecycle state of `name`, without exposing any payload
    pub fn state(&self, name: &str) -> ObjectState {
        self.objects
            .get(name)
            .map_or(ObjectState::Absent, |entry| entry.state())
    }

    /// Number of entries, reserved and complete
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_before_reserve_is_not_found() {
        let store = ObjectStore::new();
        assert!(matches!(store.complete("x"), Err(Error::NotFound { .. })));
        assert_eq!(store.state("x"), ObjectState::Absent);
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_before_complete_is_incomplete() {
        let store = ObjectStore::new();
        store.reserve("x", "HELLO");
        assert!(matches!(store.get("x"), Err(Error::Incomplete { .. })));
        assert_eq!(store.state("x"), ObjectState::Reserved);
    }

    #[test]
    fn test_get_after_complete_returns_reserved_payload() {
        let store = ObjectStore::new();
        store.reserve("x", "HELLO");
        store.complete("x").unwrap();
        assert_eq!(store.get("x").unwrap(), Bytes::from_static(b"HELLO"));
        assert_eq!(store.state("x"), ObjectState::Complete);
    }

    #[test]
    fn test_get_absent_is_not_found() {
        let store = ObjectStore::new();
        assert!(matches!(store.get("x"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_reserve_overwrites_and_resets() {
        let store = ObjectStore::new();
        store.reserve("x", "first");
        store.complete("x").unwrap();

        store.reserve("x", "second");
        assert_eq!(store.state("x"), ObjectState::Reserved);
        assert!(matches!(store.get("x"), Err(Error::Incomplete { .. })));

        store.complete("x").unwrap();
        assert_eq!(store.get("x").unwrap(), Bytes::from_static(b"second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = ObjectStore::new();
        store.remove("x");
        store.remove("x");

        store.reserve("x", "HELLO");
        store.complete("x").unwrap();
        store.remove("x");
        store.remove("x");
        assert!(matches!(store.get("x"), Err(Error::NotFound { .. })));
        assert_eq!(store.state("x"), ObjectState::Absent);
    }

    #[test]
    fn test_failed_complete_leaves_other_entries_untouched() {
        let store = ObjectStore::new();
        store.reserve("a", "A");
        assert!(store.complete("b").is_err());
        assert_eq!(store.state("a"), ObjectState::Reserved);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_payload_is_a_valid_object() {
        let store = ObjectStore::new();
        store.reserve("empty", Bytes::new());
        store.complete("empty").unwrap();
        assert!(store.get("empty").unwrap().is_empty());
    }
}

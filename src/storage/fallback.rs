//! Store wrapper that degrades to memory when the primary backend fails.

use std::sync::{Arc, OnceLock};
use tracing::{instrument, warn};

use crate::storage::{KeyValueStore, MemoryStore, StorageError};

/// Wraps a primary store and switches to a fresh [`MemoryStore`] after the
/// first failed operation.
///
/// Once degraded the wrapper never returns to the primary: the rest of the
/// process runs on in-memory defaults. Clones share the degraded state.
#[derive(Debug, Clone)]
pub struct FallbackStore<S> {
    primary: S,
    fallback: Arc<OnceLock<MemoryStore>>,
}

impl<S: KeyValueStore> FallbackStore<S> {
    /// Wraps `primary`.
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            fallback: Arc::new(OnceLock::new()),
        }
    }

    /// Starts directly in the degraded state, used when the primary cannot
    /// even be opened.
    pub fn degraded(primary: S) -> Self {
        let store = Self::new(primary);
        store.fallback.get_or_init(MemoryStore::new);
        store
    }

    /// True once operations are served from memory.
    pub fn is_degraded(&self) -> bool {
        self.fallback.get().is_some()
    }

    /// Runs `op` against the active backend, degrading on primary failure.
    #[instrument(skip(self, op))]
    fn with_backend<T>(
        &self,
        op_name: &str,
        op: impl Fn(&dyn KeyValueStore) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        if let Some(memory) = self.fallback.get() {
            return op(memory);
        }

        match op(&self.primary) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(error = %e, op = op_name, "Storage unavailable, falling back to memory");
                op(self.fallback.get_or_init(MemoryStore::new))
            }
        }
    }
}

impl<S: KeyValueStore> KeyValueStore for FallbackStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_backend("get", |store| store.get(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_backend("set", |store| store.set(key, value))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_backend("remove", |store| store.remove(key))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.with_backend("clear", |store| store.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that fails every operation.
    #[derive(Debug, Clone)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::unavailable("disk gone"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::unavailable("disk gone"))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::unavailable("disk gone"))
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::unavailable("disk gone"))
        }
    }

    #[test]
    fn test_healthy_primary_is_used() {
        let primary = MemoryStore::new();
        let store = FallbackStore::new(primary.clone());
        store.set("k", "v").unwrap();
        assert!(!store.is_degraded());
        assert_eq!(primary.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_failure_degrades_to_memory() {
        let store = FallbackStore::new(BrokenStore);
        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.is_degraded());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_clones_share_degraded_state() {
        let store = FallbackStore::new(BrokenStore);
        let other = store.clone();
        store.set("k", "v").unwrap();
        assert!(other.is_degraded());
        assert_eq!(other.get("k").unwrap(), Some("v".to_string()));
    }
}

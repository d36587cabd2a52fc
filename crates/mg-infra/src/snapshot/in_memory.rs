use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use mg_core::ports::{SnapshotStoreError, SnapshotStorePort};

/// Process-local snapshot slots, living as long as the session that owns
/// the store.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SnapshotStorePort for InMemorySnapshotStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotStoreError> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), SnapshotStoreError> {
        self.slots().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SnapshotStoreError> {
        self.slots().remove(key);
        Ok(())
    }
}

use crate::Storage;
use gasless_core::{ErrorCode, ReadonlyKV, StateChange};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory ordered store.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    state: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Copies out every entry, in key order.
    pub fn snapshot(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.state
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl ReadonlyKV for MemoryStorage {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, ErrorCode> {
        Ok(self.state.read().get(key).cloned())
    }
}

impl Storage for MemoryStorage {
    fn batch(&self, changes: Vec<StateChange>) -> Result<(), ErrorCode> {
        let mut guard = self.state.write();

        for change in changes {
            match change {
                StateChange::Set { key, value } => {
                    guard.insert(key, value);
                }
                StateChange::Remove { key } => {
                    guard.remove(&key);
                }
            }
        }

        Ok(())
    }
}

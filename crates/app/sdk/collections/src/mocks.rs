use gasless_core::{ReadonlyKV, SdkResult, WritableKV};
use std::collections::HashMap;

/// Plain in-memory backend for collection tests.
#[derive(Default)]
pub struct MockStore {
    storage: HashMap<Vec<u8>, Vec<u8>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadonlyKV for MockStore {
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        Ok(self.storage.get(key).cloned())
    }
}

impl WritableKV for MockStore {
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()> {
        self.storage.insert(key.to_vec(), value);
        Ok(())
    }

    fn remove(&mut self, key: &[u8]) -> SdkResult<()> {
        self.storage.remove(key);
        Ok(())
    }
}

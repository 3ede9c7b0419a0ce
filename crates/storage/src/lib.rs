pub mod memory;

pub use memory::MemoryStorage;

use gasless_core::{ErrorCode, ReadonlyKV, StateChange};

/// Committed key-value store underneath every execution overlay.
pub trait Storage: ReadonlyKVExt + Send + Sync {
    /// Applies a batch of changes atomically.
    fn batch(&self, changes: Vec<StateChange>) -> Result<(), ErrorCode>;
}

/// Extension trait for ReadonlyKV with additional utility methods
pub trait ReadonlyKVExt: ReadonlyKV {
    /// Check if a key exists
    fn exists(&self, key: &[u8]) -> Result<bool, ErrorCode> {
        Ok(self.get(key)?.is_some())
    }

    /// Get a value or return a default if not found
    fn get_or_default(&self, key: &[u8], default: Vec<u8>) -> Result<Vec<u8>, ErrorCode> {
        Ok(self.get(key)?.unwrap_or(default))
    }
}

impl<T: ReadonlyKV + ?Sized> ReadonlyKVExt for T {}

use crate::errors::{
    ERR_INVALID_CHECKPOINT, ERR_KEY_TOO_LARGE, ERR_OVERLAY_SIZE_EXCEEDED, ERR_TOO_MANY_EVENTS,
    ERR_VALUE_TOO_LARGE,
};
use gasless_core::{ErrorCode, ReadonlyKV, SdkResult, StateChange as CoreStateChange, WritableKV};
use hashbrown::HashMap;

// Limits to bound memory use by a single execution
const MAX_OVERLAY_ENTRIES: usize = 100_000;
const MAX_EVENTS_PER_EXECUTION: usize = 10_000;
const MAX_KEY_SIZE: usize = 256;
const MAX_VALUE_SIZE: usize = 1024 * 1024;

const INITIAL_OVERLAY_CAPACITY: usize = 64;
const INITIAL_UNDO_LOG_CAPACITY: usize = 32;
const INITIAL_EVENTS_CAPACITY: usize = 8;

/// One overlay mutation, stored as the delta needed to undo it.
#[derive(Debug)]
struct UndoEntry {
    key: Vec<u8>,
    /// `None` when the key had no overlay entry before the change.
    previous: Option<Option<Vec<u8>>>,
}

impl UndoEntry {
    fn revert(self, overlay: &mut HashMap<Vec<u8>, Option<Vec<u8>>>) {
        match self.previous {
            Some(prev_value) => {
                overlay.insert(self.key, prev_value);
            }
            None => {
                overlay.remove(&self.key);
            }
        }
    }
}

/// Position in an [`ExecutionState`] that it can be rolled back to.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    undo_log_index: usize,
    events_index: usize,
}

/// Write overlay over a read-only store `S`, collecting events of type `E`.
///
/// The overlay maps each touched key to:
///  - `Some(value)` => key is set to `value`
///  - `None` => key is removed (tombstone)
///
/// Keys without an entry fall back to the underlying store.
#[derive(Debug)]
pub struct ExecutionState<'a, S, E> {
    base_storage: &'a S,
    overlay: HashMap<Vec<u8>, Option<Vec<u8>>>,
    undo_log: Vec<UndoEntry>,
    events: Vec<E>,
}

impl<'a, S, E> ExecutionState<'a, S, E> {
    pub fn new(base_storage: &'a S) -> Self {
        Self {
            base_storage,
            overlay: HashMap::with_capacity(INITIAL_OVERLAY_CAPACITY),
            undo_log: Vec::with_capacity(INITIAL_UNDO_LOG_CAPACITY),
            events: Vec::with_capacity(INITIAL_EVENTS_CAPACITY),
        }
    }

    /// Appends an event to this execution's ordered event list.
    pub fn emit_event(&mut self, event: E) -> Result<(), ErrorCode> {
        if self.events.len() >= MAX_EVENTS_PER_EXECUTION {
            return Err(ERR_TOO_MANY_EVENTS);
        }
        self.events.push(event);
        Ok(())
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            undo_log_index: self.undo_log.len(),
            events_index: self.events.len(),
        }
    }

    /// Rolls the overlay and event list back to `checkpoint`.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<(), ErrorCode> {
        if checkpoint.undo_log_index > self.undo_log.len()
            || checkpoint.events_index > self.events.len()
        {
            return Err(ERR_INVALID_CHECKPOINT);
        }

        while self.undo_log.len() > checkpoint.undo_log_index {
            if let Some(change) = self.undo_log.pop() {
                change.revert(&mut self.overlay);
            }
        }

        self.events.truncate(checkpoint.events_index);
        Ok(())
    }

    /// Consumes the overlay, yielding the store mutations and the emitted events.
    ///
    /// Changes are sorted by key so that applying them is deterministic.
    pub fn into_parts(self) -> (Vec<CoreStateChange>, Vec<E>) {
        let mut changes: Vec<CoreStateChange> = self
            .overlay
            .into_iter()
            .map(|(key, maybe_value)| match maybe_value {
                Some(value) => CoreStateChange::Set { key, value },
                None => CoreStateChange::Remove { key },
            })
            .collect();
        changes.sort_by(|a, b| a.key().cmp(b.key()));
        (changes, self.events)
    }

    fn record_undo(&mut self, key: &[u8]) -> Result<(), ErrorCode> {
        if key.len() > MAX_KEY_SIZE {
            return Err(ERR_KEY_TOO_LARGE);
        }

        let previous = self.overlay.get(key).cloned();
        if previous.is_none() && self.overlay.len() >= MAX_OVERLAY_ENTRIES {
            return Err(ERR_OVERLAY_SIZE_EXCEEDED);
        }

        self.undo_log.push(UndoEntry {
            key: key.to_vec(),
            previous,
        });
        Ok(())
    }
}

impl<S: ReadonlyKV, E> ReadonlyKV for ExecutionState<'_, S, E> {
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>> {
        match self.overlay.get(key) {
            Some(Some(value)) => Ok(Some(value.clone())),
            Some(None) => Ok(None),
            None => self.base_storage.get(key),
        }
    }
}

impl<S: ReadonlyKV, E> WritableKV for ExecutionState<'_, S, E> {
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(ERR_VALUE_TOO_LARGE);
        }
        self.record_undo(key)?;
        self.overlay.insert(key.to_vec(), Some(value));
        Ok(())
    }

    fn remove(&mut self, key: &[u8]) -> SdkResult<()> {
        self.record_undo(key)?;
        self.overlay.insert(key.to_vec(), None);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;

    /// Read-only backing store seeded at construction.
    struct MockReadonlyKV {
        data: StdHashMap<Vec<u8>, Vec<u8>>,
    }

    impl MockReadonlyKV {
        fn new() -> Self {
            Self {
                data: StdHashMap::new(),
            }
        }

        fn new_with_data(pairs: &[(&[u8], &[u8])]) -> Self {
            let mut data = StdHashMap::new();
            for (k, v) in pairs {
                data.insert(k.to_vec(), v.to_vec());
            }
            Self { data }
        }
    }

    impl ReadonlyKV for MockReadonlyKV {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, ErrorCode> {
            Ok(self.data.get(key).cloned())
        }
    }

    type State<'a> = ExecutionState<'a, MockReadonlyKV, &'static str>;

    #[test]
    fn test_basic_set_get() {
        let storage = MockReadonlyKV::new();
        let mut cp = State::new(&storage);

        assert!(cp.get(b"hello").unwrap().is_none());
        cp.set(b"hello", b"world".to_vec()).unwrap();
        assert_eq!(cp.get(b"hello").unwrap().unwrap(), b"world");
    }

    #[test]
    fn test_remove() {
        let storage = MockReadonlyKV::new_with_data(&[(b"alpha", b"beta")]);
        let mut cp = State::new(&storage);

        assert_eq!(cp.get(b"alpha").unwrap().unwrap(), b"beta");
        cp.remove(b"alpha").unwrap();
        assert!(cp.get(b"alpha").unwrap().is_none());
    }

    #[test]
    fn test_checkpoint_restore() {
        let storage = MockReadonlyKV::new();
        let mut cp = State::new(&storage);

        cp.set(b"key1", b"A".to_vec()).unwrap();
        let c1 = cp.checkpoint();

        cp.set(b"key1", b"B".to_vec()).unwrap();
        cp.set(b"key2", b"ZZ".to_vec()).unwrap();
        assert_eq!(cp.get(b"key1").unwrap().unwrap(), b"B");
        assert_eq!(cp.get(b"key2").unwrap().unwrap(), b"ZZ");

        cp.restore(c1).unwrap();

        assert_eq!(cp.get(b"key1").unwrap().unwrap(), b"A");
        assert!(cp.get(b"key2").unwrap().is_none());
    }

    #[test]
    fn test_multiple_checkpoints() {
        let storage = MockReadonlyKV::new();
        let mut cp = State::new(&storage);

        cp.set(b"key1", b"one".to_vec()).unwrap();
        let c1 = cp.checkpoint();
        cp.set(b"key1", b"uno".to_vec()).unwrap();
        let c2 = cp.checkpoint();
        cp.set(b"key1", b"eins".to_vec()).unwrap();

        assert_eq!(cp.get(b"key1").unwrap().unwrap(), b"eins");
        cp.restore(c2).unwrap();
        assert_eq!(cp.get(b"key1").unwrap().unwrap(), b"uno");
        cp.restore(c1).unwrap();
        assert_eq!(cp.get(b"key1").unwrap().unwrap(), b"one");
    }

    #[test]
    fn test_remove_and_restore() {
        let storage = MockReadonlyKV::new_with_data(&[(b"key", b"store_val")]);
        let mut cp = State::new(&storage);

        let c1 = cp.checkpoint();
        cp.remove(b"key").unwrap();
        assert!(cp.get(b"key").unwrap().is_none());

        cp.restore(c1).unwrap();
        assert_eq!(cp.get(b"key").unwrap().unwrap(), b"store_val");
    }

    #[test]
    fn test_remove_nonexistent_key() {
        let storage = MockReadonlyKV::new();
        let mut cp = State::new(&storage);

        let c1 = cp.checkpoint();
        cp.remove(b"nonexistent").unwrap();
        assert!(cp.get(b"nonexistent").unwrap().is_none());

        cp.restore(c1).unwrap();
        assert!(cp.get(b"nonexistent").unwrap().is_none());
        assert!(cp.into_parts().0.is_empty());
    }

    #[test]
    fn test_restore_truncates_events() {
        let storage = MockReadonlyKV::new();
        let mut cp = State::new(&storage);

        cp.emit_event("first").unwrap();
        let c1 = cp.checkpoint();
        cp.emit_event("second").unwrap();
        cp.set(b"k", b"v".to_vec()).unwrap();

        cp.restore(c1).unwrap();
        assert_eq!(cp.events(), &["first"]);
        assert!(cp.get(b"k").unwrap().is_none());
    }

    #[test]
    fn test_restore_rejects_foreign_checkpoint() {
        let storage = MockReadonlyKV::new();
        let mut long = State::new(&storage);
        long.set(b"a", b"1".to_vec()).unwrap();
        long.set(b"b", b"2".to_vec()).unwrap();
        let foreign = long.checkpoint();

        let mut short = State::new(&storage);
        assert_eq!(short.restore(foreign).unwrap_err(), ERR_INVALID_CHECKPOINT);
    }

    #[test]
    fn test_size_limits() {
        let storage = MockReadonlyKV::new();
        let mut cp = State::new(&storage);

        let large_key = vec![0u8; MAX_KEY_SIZE + 1];
        assert_eq!(
            cp.set(&large_key, b"v".to_vec()).unwrap_err(),
            ERR_KEY_TOO_LARGE
        );
        assert_eq!(
            cp.set(b"k", vec![0u8; MAX_VALUE_SIZE + 1]).unwrap_err(),
            ERR_VALUE_TOO_LARGE
        );
    }

    #[test]
    fn test_into_parts_is_sorted() {
        let storage = MockReadonlyKV::new_with_data(&[(b"a", b"old")]);
        let mut cp = State::new(&storage);

        cp.set(b"c", b"3".to_vec()).unwrap();
        cp.remove(b"a").unwrap();
        cp.set(b"b", b"2".to_vec()).unwrap();
        cp.emit_event("done").unwrap();

        let (changes, events) = cp.into_parts();
        assert_eq!(
            changes,
            vec![
                CoreStateChange::Remove { key: b"a".to_vec() },
                CoreStateChange::Set {
                    key: b"b".to_vec(),
                    value: b"2".to_vec()
                },
                CoreStateChange::Set {
                    key: b"c".to_vec(),
                    value: b"3".to_vec()
                },
            ]
        );
        assert_eq!(events, vec!["done"]);
    }
}

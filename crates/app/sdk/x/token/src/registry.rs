use alloy_primitives::{Address, B256};
use gasless_collections::map::Map;
use gasless_core::ReadonlyKV;

use crate::{TokenError, TokenEvent, TokenState};

/// Per-authorizer record of consumed nonces.
///
/// Nonces form one flat key space per authorizer regardless of which
/// operation consumed them. Entries are never reset.
pub struct AuthorizationRegistry {
    states: Map<(Address, B256), bool>,
}

impl Default for AuthorizationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorizationRegistry {
    pub const fn new() -> Self {
        Self { states: Map::new(2) }
    }

    pub fn is_used<B: ReadonlyKV + ?Sized>(
        &self,
        authorizer: Address,
        nonce: B256,
        backend: &B,
    ) -> Result<bool, TokenError> {
        Ok(self
            .states
            .may_get(&(authorizer, nonce), backend)?
            .unwrap_or(false))
    }

    pub(crate) fn ensure_unused<B: ReadonlyKV + ?Sized>(
        &self,
        authorizer: Address,
        nonce: B256,
        backend: &B,
    ) -> Result<(), TokenError> {
        if self.is_used(authorizer, nonce, backend)? {
            return Err(TokenError::AuthorizationAlreadyUsed);
        }
        Ok(())
    }

    /// Marks the nonce consumed and emits `AuthorizationConsumed`.
    pub(crate) fn mark_used<S: ReadonlyKV>(
        &self,
        authorizer: Address,
        nonce: B256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.consume(authorizer, nonce, state)?;
        state.emit_event(TokenEvent::AuthorizationConsumed { authorizer, nonce })?;
        Ok(())
    }

    /// Voids the nonce and emits `AuthorizationCanceled`.
    pub(crate) fn mark_canceled<S: ReadonlyKV>(
        &self,
        authorizer: Address,
        nonce: B256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.consume(authorizer, nonce, state)?;
        state.emit_event(TokenEvent::AuthorizationCanceled { authorizer, nonce })?;
        Ok(())
    }

    fn consume<S: ReadonlyKV>(
        &self,
        authorizer: Address,
        nonce: B256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.ensure_unused(authorizer, nonce, &*state)?;
        self.states.set(&(authorizer, nonce), &true, state)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gasless_storage::MemoryStorage;

    const ALICE: Address = Address::repeat_byte(0xA1);

    #[test]
    fn test_mark_used_once() {
        let storage = MemoryStorage::new();
        let mut state = TokenState::new(&storage);
        let registry = AuthorizationRegistry::new();
        let nonce = B256::repeat_byte(7);

        assert!(!registry.is_used(ALICE, nonce, &state).unwrap());
        registry.mark_used(ALICE, nonce, &mut state).unwrap();
        assert!(registry.is_used(ALICE, nonce, &state).unwrap());

        assert_eq!(
            registry.mark_used(ALICE, nonce, &mut state).unwrap_err(),
            TokenError::AuthorizationAlreadyUsed
        );
        assert_eq!(
            state.events(),
            &[TokenEvent::AuthorizationConsumed {
                authorizer: ALICE,
                nonce
            }]
        );
    }

    #[test]
    fn test_nonces_are_scoped_per_authorizer() {
        let storage = MemoryStorage::new();
        let mut state = TokenState::new(&storage);
        let registry = AuthorizationRegistry::new();
        let nonce = B256::repeat_byte(7);

        registry.mark_used(ALICE, nonce, &mut state).unwrap();
        assert!(!registry
            .is_used(Address::repeat_byte(0xB0), nonce, &state)
            .unwrap());
    }

    #[test]
    fn test_cancel_shares_key_space() {
        let storage = MemoryStorage::new();
        let mut state = TokenState::new(&storage);
        let registry = AuthorizationRegistry::new();
        let nonce = B256::repeat_byte(9);

        registry.mark_canceled(ALICE, nonce, &mut state).unwrap();
        assert_eq!(
            registry.mark_used(ALICE, nonce, &mut state).unwrap_err(),
            TokenError::AuthorizationAlreadyUsed
        );
    }

    #[test]
    fn test_restore_unmarks() {
        let storage = MemoryStorage::new();
        let mut state = TokenState::new(&storage);
        let registry = AuthorizationRegistry::new();
        let nonce = B256::repeat_byte(3);

        let checkpoint = state.checkpoint();
        registry.mark_used(ALICE, nonce, &mut state).unwrap();
        state.restore(checkpoint).unwrap();

        assert!(!registry.is_used(ALICE, nonce, &state).unwrap());
        assert!(state.events().is_empty());
    }
}

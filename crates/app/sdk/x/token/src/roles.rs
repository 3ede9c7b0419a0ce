use alloy_primitives::{Address, U256};
use gasless_collections::{item::Item, map::Map};
use gasless_core::ReadonlyKV;

use crate::{TokenError, TokenState};

/// Mutable administrative state: minter allowances and the vault.
///
/// A minter is configured iff it has an allowance entry.
pub struct Roles {
    minter_allowances: Map<Address, U256>,
    vault: Item<Address>,
}

impl Default for Roles {
    fn default() -> Self {
        Self::new()
    }
}

impl Roles {
    pub const fn new() -> Self {
        Self {
            minter_allowances: Map::new(3),
            vault: Item::new(4),
        }
    }

    pub fn minter_allowance<B: ReadonlyKV + ?Sized>(
        &self,
        minter: Address,
        backend: &B,
    ) -> Result<Option<U256>, TokenError> {
        Ok(self.minter_allowances.may_get(&minter, backend)?)
    }

    pub fn vault<B: ReadonlyKV + ?Sized>(
        &self,
        backend: &B,
    ) -> Result<Option<Address>, TokenError> {
        Ok(self.vault.may_get(backend)?)
    }

    pub(crate) fn set_minter_allowance<S: ReadonlyKV>(
        &self,
        minter: Address,
        allowance: U256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.minter_allowances.set(&minter, &allowance, state)?;
        Ok(())
    }

    pub(crate) fn set_vault<S: ReadonlyKV>(
        &self,
        vault: Address,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.vault.set(&vault, state)?;
        Ok(())
    }
}

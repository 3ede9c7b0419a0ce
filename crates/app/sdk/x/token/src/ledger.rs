use alloy_primitives::{Address, U256};
use gasless_collections::{item::Item, map::Map};
use gasless_core::ReadonlyKV;

use crate::{TokenError, TokenEvent, TokenState};

/// Balances and total supply.
///
/// Internal transfers conserve the sum of balances; only [`Ledger::mint`]
/// and [`Ledger::burn`] change total supply.
pub struct Ledger {
    balances: Map<Address, U256>,
    total_supply: Item<U256>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub const fn new() -> Self {
        Self {
            balances: Map::new(0),
            total_supply: Item::new(1),
        }
    }

    pub fn balance_of<B: ReadonlyKV + ?Sized>(
        &self,
        account: Address,
        backend: &B,
    ) -> Result<U256, TokenError> {
        Ok(self.balances.may_get(&account, backend)?.unwrap_or_default())
    }

    pub fn total_supply<B: ReadonlyKV + ?Sized>(&self, backend: &B) -> Result<U256, TokenError> {
        Ok(self.total_supply.may_get(backend)?.unwrap_or_default())
    }

    pub(crate) fn debit<S: ReadonlyKV>(
        &self,
        account: Address,
        amount: U256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        let balance = self.balance_of(account, &*state)?;
        let remaining = balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                account,
                balance,
                required: amount,
            })?;
        self.balances.set(&account, &remaining, state)?;
        Ok(())
    }

    pub(crate) fn credit<S: ReadonlyKV>(
        &self,
        account: Address,
        amount: U256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        let balance = self.balance_of(account, &*state)?;
        let updated = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        self.balances.set(&account, &updated, state)?;
        Ok(())
    }

    /// Debit then credit, emitting `ValueTransferred`.
    pub(crate) fn transfer<S: ReadonlyKV>(
        &self,
        from: Address,
        to: Address,
        value: U256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.debit(from, value, state)?;
        self.credit(to, value, state)?;
        state.emit_event(TokenEvent::ValueTransferred { from, to, value })?;
        Ok(())
    }

    pub(crate) fn mint<S: ReadonlyKV>(
        &self,
        to: Address,
        amount: U256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        let supply = self.total_supply(&*state)?;
        let supply = supply.checked_add(amount).ok_or(TokenError::Overflow)?;
        self.total_supply.set(&supply, state)?;
        self.credit(to, amount, state)
    }

    pub(crate) fn burn<S: ReadonlyKV>(
        &self,
        from: Address,
        amount: U256,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.debit(from, amount, state)?;
        let supply = self.total_supply(&*state)?;
        let supply = supply.checked_sub(amount).ok_or(TokenError::Overflow)?;
        self.total_supply.set(&supply, state)?;
        Ok(())
    }
}

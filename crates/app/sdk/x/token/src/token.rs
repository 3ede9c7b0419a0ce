use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use gasless_operations::AppConfig;
use gasless_storage::Storage;
use gasless_tx_eth::{
    Authorization, Cancellation, ContractAccounts, SignatureInput, SignatureValidator,
    SignatureVerifierRegistry, SigningDomain,
};

use crate::executor::AuthorizationExecutor;
use crate::ledger::Ledger;
use crate::registry::AuthorizationRegistry;
use crate::roles::Roles;
use crate::submission::{SecondaryLeg, ServiceBurn, Submission, TxContext};
use crate::{TokenError, TokenEvent, TokenState};

/// Outcome of one batch entry.
pub type EntryResult = Result<Vec<TokenEvent>, TokenError>;

/// Token ledger with signature-authorized transfers.
///
/// Every mutating call runs in a fresh execution overlay over `storage` and
/// is committed only if it succeeds, returning the events it emitted.
pub struct FiatToken<S> {
    storage: S,
    owner: Address,
    master_minter: Address,
    executor: AuthorizationExecutor,
    ledger: Ledger,
    registry: AuthorizationRegistry,
    roles: Roles,
}

impl<S: Storage> FiatToken<S> {
    pub fn new(storage: S, domain: SigningDomain, owner: Address, master_minter: Address) -> Self {
        let verifiers = SignatureVerifierRegistry::ethereum(ContractAccounts::new());
        Self {
            storage,
            owner,
            master_minter,
            executor: AuthorizationExecutor::new(domain, verifiers),
            ledger: Ledger::new(),
            registry: AuthorizationRegistry::new(),
            roles: Roles::new(),
        }
    }

    /// Builds a token from validated configuration, installing the
    /// configured vault if any.
    pub fn from_config(config: &AppConfig, storage: S) -> Result<Self, TokenError> {
        let mut token = Self::new(
            storage,
            config.domain.signing_domain(),
            config.roles.owner,
            config.roles.master_minter,
        );
        if let Some(vault) = config.roles.vault {
            token.set_vault(config.roles.owner, vault)?;
        }
        Ok(token)
    }

    fn apply<F>(&self, operation: &'static str, f: F) -> Result<Vec<TokenEvent>, TokenError>
    where
        F: FnOnce(&mut TokenState<'_, S>) -> Result<(), TokenError>,
    {
        let mut state = TokenState::new(&self.storage);
        f(&mut state)?;

        let (changes, events) = state.into_parts();
        self.storage.batch(changes)?;
        tracing::debug!(operation, events = events.len(), "operation committed");
        Ok(events)
    }

    // ---------------------------------------------------------------------
    // Signature-authorized operations
    // ---------------------------------------------------------------------

    pub fn transfer_with_authorization(
        &mut self,
        ctx: &TxContext,
        authorization: &Authorization,
        signature: &SignatureInput,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("transfer_with_authorization", |state| {
            self.executor
                .execute_transfer(ctx, authorization, signature, state)
        })
    }

    pub fn receive_with_authorization(
        &mut self,
        ctx: &TxContext,
        authorization: &Authorization,
        signature: &SignatureInput,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("receive_with_authorization", |state| {
            self.executor
                .execute_receive(ctx, authorization, signature, state)
        })
    }

    pub fn transfer_with_authorization_and_charge(
        &mut self,
        ctx: &TxContext,
        authorization: &Authorization,
        signature: &SignatureInput,
        charge: &SecondaryLeg,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("transfer_with_authorization_and_charge", |state| {
            let vault = self.require_vault(state)?;
            self.executor.execute_transfer_with_charge(
                ctx,
                authorization,
                signature,
                charge,
                vault,
                state,
            )
        })
    }

    pub fn transfer_with_authorization_and_fee_refund(
        &mut self,
        ctx: &TxContext,
        authorization: &Authorization,
        signature: &SignatureInput,
        refund: &SecondaryLeg,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("transfer_with_authorization_and_fee_refund", |state| {
            let vault = self.require_vault(state)?;
            self.executor.execute_transfer_with_fee_refund(
                ctx,
                authorization,
                signature,
                refund,
                vault,
                state,
            )
        })
    }

    /// Authorized transfer into the master minter, which burns it later.
    pub fn burn_by_service(
        &mut self,
        ctx: &TxContext,
        burn: &ServiceBurn,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("burn_by_service", |state| {
            self.executor
                .execute_burn_by_service(ctx, burn, self.master_minter, state)
        })
    }

    pub fn cancel_authorization(
        &mut self,
        cancellation: &Cancellation,
        signature: &SignatureInput,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("cancel_authorization", |state| {
            self.executor
                .execute_cancel(cancellation, signature, state)
        })
    }

    pub fn submit(
        &mut self,
        ctx: &TxContext,
        submission: &Submission,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply(submission.name(), |state| {
            self.dispatch(ctx, submission, state)
        })
    }

    /// Applies `submissions` in order within one overlay.
    ///
    /// Each entry runs from its own checkpoint; a failing entry is rolled
    /// back and reported while the others still commit. The outer error is
    /// only returned if the final commit fails.
    pub fn execute_batch(
        &mut self,
        ctx: &TxContext,
        submissions: &[Submission],
    ) -> Result<Vec<EntryResult>, TokenError> {
        let mut state = TokenState::new(&self.storage);
        let mut results = Vec::with_capacity(submissions.len());

        for submission in submissions {
            let checkpoint = state.checkpoint();
            let emitted_before = state.events().len();

            match self.dispatch(ctx, submission, &mut state) {
                Ok(()) => {
                    results.push(Ok(state.events()[emitted_before..].to_vec()));
                }
                Err(err) => {
                    state.restore(checkpoint)?;
                    tracing::debug!(
                        operation = submission.name(),
                        error = %err,
                        "batch entry rolled back"
                    );
                    results.push(Err(err));
                }
            }
        }

        let (changes, _) = state.into_parts();
        self.storage.batch(changes)?;
        tracing::debug!(entries = results.len(), "batch committed");
        Ok(results)
    }

    fn dispatch(
        &self,
        ctx: &TxContext,
        submission: &Submission,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        match submission {
            Submission::Transfer {
                authorization,
                signature,
            } => self
                .executor
                .execute_transfer(ctx, authorization, signature, state),
            Submission::TransferWithCharge {
                authorization,
                signature,
                charge,
            } => {
                let vault = self.require_vault(state)?;
                self.executor.execute_transfer_with_charge(
                    ctx,
                    authorization,
                    signature,
                    charge,
                    vault,
                    state,
                )
            }
            Submission::TransferWithFeeRefund {
                authorization,
                signature,
                refund,
            } => {
                let vault = self.require_vault(state)?;
                self.executor.execute_transfer_with_fee_refund(
                    ctx,
                    authorization,
                    signature,
                    refund,
                    vault,
                    state,
                )
            }
            Submission::BurnByService(burn) => {
                self.executor
                    .execute_burn_by_service(ctx, burn, self.master_minter, state)
            }
            Submission::Receive {
                authorization,
                signature,
            } => self
                .executor
                .execute_receive(ctx, authorization, signature, state),
            Submission::Cancel {
                cancellation,
                signature,
            } => self
                .executor
                .execute_cancel(cancellation, signature, state),
        }
    }

    fn require_vault(&self, state: &TokenState<'_, S>) -> Result<Address, TokenError> {
        self.roles.vault(state)?.ok_or(TokenError::VaultNotSet)
    }

    // ---------------------------------------------------------------------
    // Administration
    // ---------------------------------------------------------------------

    /// Sets `minter`'s remaining mint allowance. Owner only.
    pub fn configure_minter(
        &mut self,
        caller: Address,
        minter: Address,
        allowance: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("configure_minter", |state| {
            self.ensure_owner(caller)?;
            if minter.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
            self.roles.set_minter_allowance(minter, allowance, state)?;
            state.emit_event(TokenEvent::MinterConfigured { minter, allowance })?;
            tracing::info!(%minter, %allowance, "minter configured");
            Ok(())
        })
    }

    /// Owner only.
    pub fn set_vault(
        &mut self,
        caller: Address,
        vault: Address,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("set_vault", |state| {
            self.ensure_owner(caller)?;
            if vault.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
            self.roles.set_vault(vault, state)?;
            state.emit_event(TokenEvent::VaultUpdated { vault })?;
            tracing::info!(%vault, "vault updated");
            Ok(())
        })
    }

    /// Mints `amount` to `to`, spending the caller's minter allowance.
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("mint", |state| {
            if to.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
            if amount.is_zero() {
                return Err(TokenError::ZeroAmount);
            }
            let allowance = self
                .roles
                .minter_allowance(caller, &*state)?
                .ok_or(TokenError::NotMinter)?;
            let remaining = allowance
                .checked_sub(amount)
                .ok_or(TokenError::MintAllowanceExceeded)?;

            self.ledger.mint(to, amount, state)?;
            self.roles.set_minter_allowance(caller, remaining, state)?;
            state.emit_event(TokenEvent::Mint {
                minter: caller,
                to,
                amount,
            })?;
            Ok(())
        })
    }

    /// Destroys `amount` of a minter's own balance.
    ///
    /// This is how the master minter disposes of what service burns
    /// accumulated in its account.
    pub fn burn(&mut self, caller: Address, amount: U256) -> Result<Vec<TokenEvent>, TokenError> {
        self.apply("burn", |state| {
            if amount.is_zero() {
                return Err(TokenError::ZeroAmount);
            }
            if caller != self.master_minter
                && self.roles.minter_allowance(caller, &*state)?.is_none()
            {
                return Err(TokenError::NotMinter);
            }
            self.ledger.burn(caller, amount, state)?;
            state.emit_event(TokenEvent::Burn {
                burner: caller,
                amount,
            })?;
            Ok(())
        })
    }

    /// Attaches an ERC-1271 validator to `account`, making it a contract
    /// signer for every later authorization.
    pub fn register_contract_account(
        &mut self,
        account: Address,
        validator: Arc<dyn SignatureValidator>,
    ) {
        self.executor.verifiers().accounts().register(account, validator);
        tracing::info!(%account, "contract account registered");
    }

    fn ensure_owner(&self, caller: Address) -> Result<(), TokenError> {
        if caller != self.owner {
            return Err(TokenError::NotOwner);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn balance_of(&self, account: Address) -> Result<U256, TokenError> {
        self.ledger.balance_of(account, &self.storage)
    }

    pub fn total_supply(&self) -> Result<U256, TokenError> {
        self.ledger.total_supply(&self.storage)
    }

    /// Whether `nonce` has been used or canceled by `authorizer`.
    pub fn authorization_state(
        &self,
        authorizer: Address,
        nonce: B256,
    ) -> Result<bool, TokenError> {
        self.registry.is_used(authorizer, nonce, &self.storage)
    }

    pub fn minter_allowance(&self, minter: Address) -> Result<Option<U256>, TokenError> {
        self.roles.minter_allowance(minter, &self.storage)
    }

    pub fn vault(&self) -> Result<Option<Address>, TokenError> {
        self.roles.vault(&self.storage)
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn master_minter(&self) -> Address {
        self.master_minter
    }

    pub fn domain(&self) -> &SigningDomain {
        self.executor.domain()
    }

    pub fn domain_separator(&self) -> B256 {
        self.executor.domain().separator()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

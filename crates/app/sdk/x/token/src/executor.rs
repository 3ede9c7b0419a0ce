use alloy_primitives::{Address, U256};
use gasless_core::ReadonlyKV;
use gasless_tx_eth::{
    Authorization, AuthorizationKind, Cancellation, SignatureInput, SignatureVerifierRegistry,
    SigningDomain, WindowStatus,
};

use crate::ledger::Ledger;
use crate::registry::AuthorizationRegistry;
use crate::submission::{SecondaryLeg, ServiceBurn, TxContext};
use crate::{TokenError, TokenState};

/// Verifies authorizations and applies them to the ledger.
///
/// Checks run in a fixed order: signature format, validity window, replay,
/// signature. Every leg that passes emits `AuthorizationConsumed` followed by
/// `ValueTransferred`. Callers run each operation in its own overlay, so a
/// failing later leg also discards the earlier ones.
pub struct AuthorizationExecutor {
    domain: SigningDomain,
    verifiers: SignatureVerifierRegistry,
    ledger: Ledger,
    registry: AuthorizationRegistry,
}

impl AuthorizationExecutor {
    pub fn new(domain: SigningDomain, verifiers: SignatureVerifierRegistry) -> Self {
        Self {
            domain,
            verifiers,
            ledger: Ledger::new(),
            registry: AuthorizationRegistry::new(),
        }
    }

    pub fn domain(&self) -> &SigningDomain {
        &self.domain
    }

    pub fn verifiers(&self) -> &SignatureVerifierRegistry {
        &self.verifiers
    }

    pub fn execute_transfer<S: ReadonlyKV>(
        &self,
        ctx: &TxContext,
        authorization: &Authorization,
        signature: &SignatureInput,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.settle(
            ctx.now(),
            authorization,
            AuthorizationKind::Transfer,
            signature,
            state,
        )
    }

    /// Like [`Self::execute_transfer`], but only the payee may submit.
    pub fn execute_receive<S: ReadonlyKV>(
        &self,
        ctx: &TxContext,
        authorization: &Authorization,
        signature: &SignatureInput,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        if ctx.submitter != authorization.payee {
            return Err(TokenError::CallerMustBePayee);
        }
        self.settle(
            ctx.now(),
            authorization,
            AuthorizationKind::Receive,
            signature,
            state,
        )
    }

    /// User transfer plus a service charge from the same authorizer to `vault`.
    pub fn execute_transfer_with_charge<S: ReadonlyKV>(
        &self,
        ctx: &TxContext,
        authorization: &Authorization,
        signature: &SignatureInput,
        charge: &SecondaryLeg,
        vault: Address,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.execute_transfer(ctx, authorization, signature, state)?;

        let charge_authorization = authorization.follow_up(vault, charge.value, charge.nonce);
        self.settle(
            ctx.now(),
            &charge_authorization,
            AuthorizationKind::Transfer,
            &charge.signature,
            state,
        )
    }

    /// User transfer plus a vault-signed refund from `vault` to the payee.
    pub fn execute_transfer_with_fee_refund<S: ReadonlyKV>(
        &self,
        ctx: &TxContext,
        authorization: &Authorization,
        signature: &SignatureInput,
        refund: &SecondaryLeg,
        vault: Address,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.execute_transfer(ctx, authorization, signature, state)?;

        let refund_authorization = Authorization {
            authorizer: vault,
            payee: authorization.payee,
            value: refund.value,
            valid_after: authorization.valid_after,
            valid_before: authorization.valid_before,
            nonce: refund.nonce,
        };
        self.settle(
            ctx.now(),
            &refund_authorization,
            AuthorizationKind::Transfer,
            &refund.signature,
            state,
        )
    }

    /// Authorized transfer from the authorizer into `burner`.
    pub fn execute_burn_by_service<S: ReadonlyKV>(
        &self,
        ctx: &TxContext,
        burn: &ServiceBurn,
        burner: Address,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        self.settle(
            ctx.now(),
            &burn.authorization(burner),
            AuthorizationKind::Transfer,
            &burn.signature,
            state,
        )
    }

    /// Voids an unused nonce without moving value.
    pub fn execute_cancel<S: ReadonlyKV>(
        &self,
        cancellation: &Cancellation,
        signature: &SignatureInput,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        let Cancellation { authorizer, nonce } = *cancellation;

        self.verifiers.check_format(&authorizer, signature)?;
        self.registry.ensure_unused(authorizer, nonce, &*state)?;
        self.verifiers
            .verify(cancellation.digest(&self.domain), authorizer, signature)?;
        self.registry.mark_canceled(authorizer, nonce, state)?;

        tracing::debug!(%authorizer, %nonce, "authorization canceled");
        Ok(())
    }

    fn settle<S: ReadonlyKV>(
        &self,
        now: U256,
        authorization: &Authorization,
        kind: AuthorizationKind,
        signature: &SignatureInput,
        state: &mut TokenState<'_, S>,
    ) -> Result<(), TokenError> {
        let result = self.validate(now, authorization, kind, signature, &*state);
        if let Err(err) = &result {
            tracing::debug!(
                authorizer = %authorization.authorizer,
                nonce = %authorization.nonce,
                error = %err,
                "authorization rejected"
            );
        }
        result?;

        self.registry
            .mark_used(authorization.authorizer, authorization.nonce, state)?;
        self.ledger.transfer(
            authorization.authorizer,
            authorization.payee,
            authorization.value,
            state,
        )?;

        tracing::debug!(
            authorizer = %authorization.authorizer,
            payee = %authorization.payee,
            value = %authorization.value,
            nonce = %authorization.nonce,
            "authorization consumed"
        );
        Ok(())
    }

    fn validate<B: ReadonlyKV + ?Sized>(
        &self,
        now: U256,
        authorization: &Authorization,
        kind: AuthorizationKind,
        signature: &SignatureInput,
        backend: &B,
    ) -> Result<(), TokenError> {
        self.verifiers
            .check_format(&authorization.authorizer, signature)?;

        match authorization.window_status(now) {
            WindowStatus::NotYetValid => return Err(TokenError::AuthorizationNotYetValid),
            WindowStatus::Expired => return Err(TokenError::AuthorizationExpired),
            WindowStatus::Valid => {}
        }

        self.registry
            .ensure_unused(authorization.authorizer, authorization.nonce, backend)?;

        let digest = authorization.digest(kind, &self.domain);
        self.verifiers
            .verify(digest, authorization.authorizer, signature)?;
        Ok(())
    }
}

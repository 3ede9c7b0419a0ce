//! Registry for signer-kind-based signature verification.

use std::collections::BTreeMap;

use alloy_primitives::{Address, B256};

use crate::contract_registry::ContractAccounts;
use crate::error::SignatureError;
use crate::signature::SignatureInput;
use crate::signer_kind;
use crate::verifier::{ContractVerifier, EcdsaVerifier};

/// Everything a verifier needs to check one signature.
#[derive(Debug, Clone, Copy)]
pub struct VerificationRequest<'a> {
    pub digest: B256,
    pub claimed: Address,
    pub signature: &'a SignatureInput,
}

/// Trait object for dynamic dispatch of signature verification.
pub trait SignatureVerifierDyn: Send + Sync {
    /// Stateless well-formedness check, run before any ledger state is read.
    fn check_format(&self, _signature: &SignatureInput) -> Result<(), SignatureError> {
        Ok(())
    }

    /// Confirms that `request.claimed` approved `request.digest`.
    fn verify(&self, request: &VerificationRequest<'_>) -> Result<(), SignatureError>;
}

/// Registry that maps signer kinds to signature verifiers.
///
/// The kind of an authorizer is looked up in the shared [`ContractAccounts`]
/// table: registered contract accounts use ERC-1271, anything else is a raw
/// key holder.
pub struct SignatureVerifierRegistry {
    verifiers: BTreeMap<u16, Box<dyn SignatureVerifierDyn>>,
    accounts: ContractAccounts,
}

impl SignatureVerifierRegistry {
    /// Create an empty registry resolving kinds against `accounts`.
    pub fn new(accounts: ContractAccounts) -> Self {
        Self {
            verifiers: BTreeMap::new(),
            accounts,
        }
    }

    /// Registry with ECDSA and ERC-1271 verifiers installed.
    pub fn ethereum(accounts: ContractAccounts) -> Self {
        let mut registry = Self::new(accounts.clone());
        registry.register(signer_kind::EOA_SECP256K1, EcdsaVerifier::new());
        registry.register(
            signer_kind::CONTRACT_ERC1271,
            ContractVerifier::new(accounts),
        );
        registry
    }

    /// Register a verifier for a signer kind.
    pub fn register(&mut self, kind: u16, verifier: impl SignatureVerifierDyn + 'static) {
        self.verifiers.insert(kind, Box::new(verifier));
    }

    pub fn accounts(&self) -> &ContractAccounts {
        &self.accounts
    }

    /// Check if a signer kind is supported.
    pub fn supports(&self, kind: u16) -> bool {
        self.verifiers.contains_key(&kind)
    }

    fn verifier_for(&self, claimed: &Address) -> Result<&dyn SignatureVerifierDyn, SignatureError> {
        let kind = self.accounts.signer_kind(claimed);
        self.verifiers
            .get(&kind)
            .map(|verifier| verifier.as_ref())
            .ok_or(SignatureError::UnsupportedSignerKind(kind))
    }

    pub fn check_format(
        &self,
        claimed: &Address,
        signature: &SignatureInput,
    ) -> Result<(), SignatureError> {
        self.verifier_for(claimed)?.check_format(signature)
    }

    pub fn verify(
        &self,
        digest: B256,
        claimed: Address,
        signature: &SignatureInput,
    ) -> Result<(), SignatureError> {
        self.verifier_for(&claimed)?.verify(&VerificationRequest {
            digest,
            claimed,
            signature,
        })
    }
}

impl std::fmt::Debug for SignatureVerifierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifierRegistry")
            .field("kinds", &self.verifiers.keys().collect::<Vec<_>>())
            .field("accounts", &self.accounts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Bytes;

    #[test]
    fn test_registry_supports() {
        let registry = SignatureVerifierRegistry::ethereum(ContractAccounts::new());
        assert!(registry.supports(signer_kind::EOA_SECP256K1));
        assert!(registry.supports(signer_kind::CONTRACT_ERC1271));
        assert!(!registry.supports(0x8000));
    }

    #[test]
    fn test_empty_registry() {
        let registry = SignatureVerifierRegistry::new(ContractAccounts::new());
        let signature = SignatureInput::Packed(Bytes::new());
        assert_eq!(
            registry.verify(B256::ZERO, Address::ZERO, &signature),
            Err(SignatureError::UnsupportedSignerKind(
                signer_kind::EOA_SECP256K1
            ))
        );
    }
}

//! Contract accounts and their signature validation capability.

use alloy_primitives::{Address, B256};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::signer_kind;

/// `bytes4(keccak256("isValidSignature(bytes32,bytes)"))`
pub const ERC1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

/// The validation call itself failed (reverted, ran out of resources, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("signature validation call failed: {0}")]
pub struct ValidationCallError(pub String);

/// ERC-1271 `isValidSignature` capability attached to a contract account.
pub trait SignatureValidator: Send + Sync {
    fn is_valid_signature(
        &self,
        digest: B256,
        signature: &[u8],
    ) -> Result<[u8; 4], ValidationCallError>;
}

/// Addresses registered as contract accounts.
///
/// Clones share one table, so the verifier and the ledger see the same
/// registrations.
#[derive(Clone, Default)]
pub struct ContractAccounts {
    validators: Arc<RwLock<BTreeMap<Address, Arc<dyn SignatureValidator>>>>,
}

impl ContractAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `validator` to `address`, replacing any previous one.
    pub fn register(&self, address: Address, validator: Arc<dyn SignatureValidator>) {
        self.validators.write().insert(address, validator);
    }

    pub fn validator(&self, address: &Address) -> Option<Arc<dyn SignatureValidator>> {
        self.validators.read().get(address).cloned()
    }

    pub fn is_contract(&self, address: &Address) -> bool {
        self.validators.read().contains_key(address)
    }

    /// Signer kind tag for `address`.
    pub fn signer_kind(&self, address: &Address) -> u16 {
        if self.is_contract(address) {
            signer_kind::CONTRACT_ERC1271
        } else {
            signer_kind::EOA_SECP256K1
        }
    }
}

impl std::fmt::Debug for ContractAccounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractAccounts")
            .field("accounts", &self.validators.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

//! EIP-712 signing domain.

use alloy_primitives::{keccak256, Address, B256, U256};
use std::sync::LazyLock;

pub static EIP712_DOMAIN_TYPEHASH: LazyLock<B256> = LazyLock::new(|| {
    keccak256(b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")
});

/// Domain every authorization digest is bound to.
///
/// The separator is computed once at construction and the fields cannot be
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningDomain {
    name: String,
    version: String,
    chain_id: u64,
    verifying_contract: Address,
    separator: B256,
}

impl SigningDomain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        let separator = compute_separator(&name, &version, chain_id, verifying_contract);
        Self {
            name,
            version,
            chain_id,
            verifying_contract,
            separator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn verifying_contract(&self) -> Address {
        self.verifying_contract
    }

    pub fn separator(&self) -> B256 {
        self.separator
    }

    /// `keccak256(0x19 0x01 || separator || struct_hash)`
    pub fn hash_typed_data(&self, struct_hash: B256) -> B256 {
        let mut digest_data = Vec::with_capacity(66);
        digest_data.extend_from_slice(&[0x19, 0x01]);
        digest_data.extend_from_slice(self.separator.as_slice());
        digest_data.extend_from_slice(struct_hash.as_slice());
        keccak256(&digest_data)
    }
}

fn compute_separator(
    name: &str,
    version: &str,
    chain_id: u64,
    verifying_contract: Address,
) -> B256 {
    let mut domain_data = Vec::with_capacity(32 * 5);
    domain_data.extend_from_slice(EIP712_DOMAIN_TYPEHASH.as_slice());
    domain_data.extend_from_slice(keccak256(name.as_bytes()).as_slice());
    domain_data.extend_from_slice(keccak256(version.as_bytes()).as_slice());
    domain_data.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    domain_data.extend_from_slice(verifying_contract.into_word().as_slice());
    keccak256(&domain_data)
}

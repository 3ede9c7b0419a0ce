//! Authorization payloads and their EIP-712 struct hashes.

use alloy_primitives::{keccak256, Address, B256, U256};
use std::sync::LazyLock;

use crate::domain::SigningDomain;

pub static TRANSFER_WITH_AUTHORIZATION_TYPEHASH: LazyLock<B256> = LazyLock::new(|| {
    keccak256(
        b"TransferWithAuthorization(address from,address to,uint256 value,uint256 validAfter,uint256 validBefore,bytes32 nonce)",
    )
});

pub static RECEIVE_WITH_AUTHORIZATION_TYPEHASH: LazyLock<B256> = LazyLock::new(|| {
    keccak256(
        b"ReceiveWithAuthorization(address from,address to,uint256 value,uint256 validAfter,uint256 validBefore,bytes32 nonce)",
    )
});

pub static CANCEL_AUTHORIZATION_TYPEHASH: LazyLock<B256> =
    LazyLock::new(|| keccak256(b"CancelAuthorization(address authorizer,bytes32 nonce)"));

/// Which typed message an authorization is signed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationKind {
    Transfer,
    /// Only the payee may submit it.
    Receive,
}

impl AuthorizationKind {
    pub fn typehash(self) -> B256 {
        match self {
            AuthorizationKind::Transfer => *TRANSFER_WITH_AUTHORIZATION_TYPEHASH,
            AuthorizationKind::Receive => *RECEIVE_WITH_AUTHORIZATION_TYPEHASH,
        }
    }
}

/// A signed permission for `payee` to receive `value` from `authorizer`.
///
/// Valid for block times in `[valid_after, valid_before)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorization {
    pub authorizer: Address,
    pub payee: Address,
    pub value: U256,
    pub valid_after: U256,
    pub valid_before: U256,
    pub nonce: B256,
}

impl Authorization {
    pub fn struct_hash(&self, kind: AuthorizationKind) -> B256 {
        let mut data = Vec::with_capacity(32 * 7);
        data.extend_from_slice(kind.typehash().as_slice());
        data.extend_from_slice(self.authorizer.into_word().as_slice());
        data.extend_from_slice(self.payee.into_word().as_slice());
        data.extend_from_slice(&self.value.to_be_bytes::<32>());
        data.extend_from_slice(&self.valid_after.to_be_bytes::<32>());
        data.extend_from_slice(&self.valid_before.to_be_bytes::<32>());
        data.extend_from_slice(self.nonce.as_slice());
        keccak256(&data)
    }

    pub fn digest(&self, kind: AuthorizationKind, domain: &SigningDomain) -> B256 {
        domain.hash_typed_data(self.struct_hash(kind))
    }

    /// Second leg paid by the same authorizer under the same window.
    pub fn follow_up(&self, payee: Address, value: U256, nonce: B256) -> Authorization {
        Authorization {
            authorizer: self.authorizer,
            payee,
            value,
            valid_after: self.valid_after,
            valid_before: self.valid_before,
            nonce,
        }
    }

    /// Position of `now` relative to `[valid_after, valid_before)`.
    pub fn window_status(&self, now: U256) -> WindowStatus {
        if now < self.valid_after {
            WindowStatus::NotYetValid
        } else if now >= self.valid_before {
            WindowStatus::Expired
        } else {
            WindowStatus::Valid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    NotYetValid,
    Valid,
    Expired,
}

/// Request to void an unused nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancellation {
    pub authorizer: Address,
    pub nonce: B256,
}

impl Cancellation {
    pub fn struct_hash(&self) -> B256 {
        let mut data = Vec::with_capacity(32 * 3);
        data.extend_from_slice(CANCEL_AUTHORIZATION_TYPEHASH.as_slice());
        data.extend_from_slice(self.authorizer.into_word().as_slice());
        data.extend_from_slice(self.nonce.as_slice());
        keccak256(&data)
    }

    pub fn digest(&self, domain: &SigningDomain) -> B256 {
        domain.hash_typed_data(self.struct_hash())
    }
}

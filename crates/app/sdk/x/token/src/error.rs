use alloy_primitives::{Address, U256};
use gasless_core::ErrorCode;
use gasless_tx_eth::SignatureError;
use thiserror::Error;

/// Every way a ledger operation can fail.
///
/// A failed operation leaves balances, authorization states and the event
/// log exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid signature format: {0}")]
    InvalidSignatureFormat(&'static str),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("authorization is not yet valid")]
    AuthorizationNotYetValid,

    #[error("authorization is expired")]
    AuthorizationExpired,

    #[error("authorization is used or canceled")]
    AuthorizationAlreadyUsed,

    #[error("insufficient balance: {account} holds {balance}, needs {required}")]
    InsufficientBalance {
        account: Address,
        balance: U256,
        required: U256,
    },

    #[error("caller must be the payee")]
    CallerMustBePayee,

    #[error("caller is not the owner")]
    NotOwner,

    #[error("caller is not a minter")]
    NotMinter,

    #[error("mint amount exceeds minter allowance")]
    MintAllowanceExceeded,

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("zero address is not allowed")]
    ZeroAddress,

    #[error("vault is not set")]
    VaultNotSet,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("no verifier for signer kind {0:#06x}")]
    UnsupportedSignerKind(u16),

    #[error("storage error: {0}")]
    Storage(ErrorCode),
}

impl From<SignatureError> for TokenError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::InvalidSignatureFormat(reason) => {
                TokenError::InvalidSignatureFormat(reason)
            }
            SignatureError::InvalidSignature => TokenError::InvalidSignature,
            SignatureError::UnsupportedSignerKind(kind) => TokenError::UnsupportedSignerKind(kind),
        }
    }
}

impl From<ErrorCode> for TokenError {
    fn from(code: ErrorCode) -> Self {
        TokenError::Storage(code)
    }
}

//! Ethereum-style authorization signing for the gasless ledger.
//!
//! # Digests
//!
//! Authorizations are EIP-712 typed messages bound to a [`SigningDomain`]:
//! `keccak256(0x19 0x01 || domain_separator || struct_hash)`.
//!
//! # Verification
//!
//! [`SignatureVerifierRegistry`] dispatches on the authorizer's signer kind:
//!
//! 1. [`EcdsaVerifier`] - secp256k1 recovery, `v` in {27, 28}, low `s` only
//! 2. [`ContractVerifier`] - ERC-1271 `isValidSignature` returning
//!    [`ERC1271_MAGIC_VALUE`]
//!
//! Accounts become contract signers by registering a [`SignatureValidator`]
//! in [`ContractAccounts`].

pub mod authorization;
pub mod contract_registry;
pub mod domain;
pub mod error;
pub mod recovery;
pub mod signature;
pub mod signer_kind;
pub mod verifier;

pub use authorization::{Authorization, AuthorizationKind, Cancellation, WindowStatus};
pub use contract_registry::{
    ContractAccounts, SignatureValidator, ValidationCallError, ERC1271_MAGIC_VALUE,
};
pub use domain::SigningDomain;
pub use error::SignatureError;
pub use recovery::recover_signer;
pub use signature::{EcdsaSignature, SignatureInput, PACKED_ECDSA_LEN};
pub use verifier::{
    ContractVerifier, EcdsaVerifier, SignatureVerifierDyn, SignatureVerifierRegistry,
    VerificationRequest,
};

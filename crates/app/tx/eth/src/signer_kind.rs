//! Signer kind tags for verifier dispatch.
//!
//! The kind is derived from the authorizer account, never from the signature
//! bytes, so a contract account cannot be impersonated by a raw-key signature.

/// Raw secp256k1 key holder, verified by address recovery.
pub const EOA_SECP256K1: u16 = 0x0001;

/// Contract account exposing an ERC-1271 validation capability.
pub const CONTRACT_ERC1271: u16 = 0x0002;

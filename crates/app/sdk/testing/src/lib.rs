//! Testing utilities for the gasless ledger.
//!
//! [`TestAccount`] signs digests with a secp256k1 key and reports its
//! Ethereum address. The wallet types implement [`SignatureValidator`] so a
//! test can register them as ERC-1271 contract accounts. [`TokenFixture`]
//! wires a configured token over in-memory storage.

// Test support code: key construction failures are test bugs.
#![allow(clippy::expect_used)]

pub mod fixture;

pub use fixture::{open_authorization, TestSigner, TokenFixture, TokenFixtureBuilder};

use alloy_primitives::{keccak256, Address, Bytes, B256};
use gasless_tx_eth::{
    recover_signer, SignatureInput, SignatureValidator, ValidationCallError, ERC1271_MAGIC_VALUE,
};
use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

/// How a test submits a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFormat {
    /// 65 bytes, `r || s || v`.
    Packed,
    /// Split `(v, r, s)`.
    Vrs,
}

impl SignatureFormat {
    pub const ALL: [SignatureFormat; 2] = [SignatureFormat::Packed, SignatureFormat::Vrs];
}

/// A secp256k1 key and the address derived from it.
#[derive(Clone)]
pub struct TestAccount {
    key: SigningKey,
    address: Address,
}

impl TestAccount {
    pub fn random() -> Self {
        Self::from_key(SigningKey::random(&mut OsRng))
    }

    /// Deterministic account; equal seeds give equal accounts.
    pub fn from_seed(seed: &str) -> Self {
        let secret = keccak256(seed.as_bytes());
        let key = SigningKey::from_slice(secret.as_slice()).expect("seed hash is a valid scalar");
        Self::from_key(key)
    }

    fn from_key(key: SigningKey) -> Self {
        let address = address_of(VerifyingKey::from(&key));
        Self { key, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs a 32-byte digest in the requested format.
    pub fn sign(&self, digest: B256, format: SignatureFormat) -> SignatureInput {
        let (v, r, s) = self.sign_vrs(digest);
        let split = SignatureInput::Vrs { v, r, s };
        match format {
            SignatureFormat::Vrs => split,
            SignatureFormat::Packed => SignatureInput::Packed(split.to_packed()),
        }
    }

    fn sign_vrs(&self, digest: B256) -> (u8, B256, B256) {
        let (sig, recovery_id) = self
            .key
            .sign_prehash(digest.as_slice())
            .expect("prehash signing cannot fail for 32 bytes");
        // k256 normalizes s to the lower half, so the parity bit is usable as is
        (
            27 + u8::from(recovery_id.is_y_odd()),
            B256::from_slice(&sig.r().to_bytes()),
            B256::from_slice(&sig.s().to_bytes()),
        )
    }
}

impl std::fmt::Debug for TestAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Ethereum address of an uncompressed public key.
pub fn address_of(verifying_key: VerifyingKey) -> Address {
    let point = verifying_key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Smart wallet that accepts signatures made by its owner key.
#[derive(Debug, Clone)]
pub struct MockErc1271Wallet {
    owner: Address,
}

impl MockErc1271Wallet {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }
}

impl SignatureValidator for MockErc1271Wallet {
    fn is_valid_signature(
        &self,
        digest: B256,
        signature: &[u8],
    ) -> Result<[u8; 4], ValidationCallError> {
        let recovered = SignatureInput::Packed(Bytes::copy_from_slice(signature))
            .parse_ecdsa()
            .and_then(|sig| recover_signer(digest, &sig));
        match recovered {
            Ok(signer) if signer == self.owner => Ok(ERC1271_MAGIC_VALUE),
            _ => Ok([0xff; 4]),
        }
    }
}

/// Wallet whose validation always answers with a non-magic value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingWallet;

impl SignatureValidator for RejectingWallet {
    fn is_valid_signature(&self, _: B256, _: &[u8]) -> Result<[u8; 4], ValidationCallError> {
        Ok([0; 4])
    }
}

/// Wallet whose validation call fails outright.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingWallet;

impl SignatureValidator for FailingWallet {
    fn is_valid_signature(&self, _: B256, _: &[u8]) -> Result<[u8; 4], ValidationCallError> {
        Err(ValidationCallError("execution reverted".to_string()))
    }
}

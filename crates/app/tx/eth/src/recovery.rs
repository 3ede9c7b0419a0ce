use alloy_primitives::{keccak256, Address, B256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};
use std::sync::OnceLock;

use crate::error::SignatureError;
use crate::signature::EcdsaSignature;

/// Recovers the Ethereum address that produced `signature` over `digest`.
///
/// A point that does not lie on the curve is reported as an invalid
/// signature, since its components already passed the range checks.
pub fn recover_signer(digest: B256, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    let recid = RecoveryId::from_i32(i32::from(signature.y_parity()))
        .map_err(|_| SignatureError::InvalidSignatureFormat("bad recovery id"))?;
    let recoverable = RecoverableSignature::from_compact(&signature.compact(), recid)
        .map_err(|_| SignatureError::InvalidSignatureFormat("bad signature encoding"))?;

    let msg = Message::from_digest_slice(digest.as_slice())
        .map_err(|_| SignatureError::InvalidSignature)?;
    let pubkey = secp()
        .recover_ecdsa(&msg, &recoverable)
        .map_err(|_| SignatureError::InvalidSignature)?;
    let uncompressed = pubkey.serialize_uncompressed();
    let pubkey_payload = uncompressed
        .get(1..)
        .ok_or(SignatureError::InvalidSignature)?;
    let hash = keccak256(pubkey_payload);
    let address_bytes = hash
        .as_slice()
        .get(12..)
        .ok_or(SignatureError::InvalidSignature)?;
    Ok(Address::from_slice(address_bytes))
}

fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::unwrap_used)]
mod tests {
    use super::*;
    use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey, VerifyingKey};
    use rand::rngs::OsRng;

    fn sign_hash(signing_key: &SigningKey, hash: B256) -> EcdsaSignature {
        let (sig, recovery_id) = signing_key.sign_prehash(hash.as_ref()).unwrap();
        let r = B256::from_slice(&sig.r().to_bytes());
        let s = B256::from_slice(&sig.s().to_bytes());
        let v = 27 + u8::from(recovery_id.is_y_odd());
        EcdsaSignature::new(v, r, s).unwrap()
    }

    fn get_address(signing_key: &SigningKey) -> Address {
        let verifying_key = VerifyingKey::from(signing_key);
        let public_key = verifying_key.to_encoded_point(false);
        let public_key_bytes = &public_key.as_bytes()[1..];
        let hash = keccak256(public_key_bytes);
        Address::from_slice(&hash[12..])
    }

    #[test]
    fn test_recover_signer_from_valid_signature() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"authorization-recovery-test");
        let signature = sign_hash(&signing_key, digest);

        let recovered = recover_signer(digest, &signature).unwrap();

        assert_eq!(recovered, get_address(&signing_key));
    }

    #[test]
    fn test_recover_signer_detects_flipped_parity() {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"flipped-parity");
        let valid = sign_hash(&signing_key, digest);
        let flipped = EcdsaSignature::new(55 - valid.v(), valid.r(), valid.s()).unwrap();

        let recovered_valid = recover_signer(digest, &valid).unwrap();
        // Either a different key or no key at all.
        match recover_signer(digest, &flipped) {
            Ok(recovered) => assert_ne!(recovered, recovered_valid),
            Err(err) => assert_eq!(err, SignatureError::InvalidSignature),
        }
    }

    #[test]
    fn test_recover_signer_different_digest_yields_other_address() {
        let signing_key = SigningKey::random(&mut OsRng);
        let signature = sign_hash(&signing_key, keccak256(b"signed"));

        if let Ok(recovered) = recover_signer(keccak256(b"submitted"), &signature) {
            assert_ne!(recovered, get_address(&signing_key));
        }
    }
}

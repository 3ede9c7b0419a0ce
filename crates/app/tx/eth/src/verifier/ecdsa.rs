//! Raw-key verification by secp256k1 address recovery.

use crate::error::SignatureError;
use crate::recovery::recover_signer;
use crate::signature::SignatureInput;
use crate::verifier::{SignatureVerifierDyn, VerificationRequest};

/// Accepts a signature iff the recovered address equals the claimed signer.
#[derive(Clone, Debug, Default)]
pub struct EcdsaVerifier;

impl EcdsaVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerifierDyn for EcdsaVerifier {
    fn check_format(&self, signature: &SignatureInput) -> Result<(), SignatureError> {
        signature.parse_ecdsa().map(|_| ())
    }

    fn verify(&self, request: &VerificationRequest<'_>) -> Result<(), SignatureError> {
        let parsed = request.signature.parse_ecdsa()?;
        let recovered = recover_signer(request.digest, &parsed)?;
        if recovered == request.claimed {
            Ok(())
        } else {
            Err(SignatureError::InvalidSignature)
        }
    }
}

//! Signature verification errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The signature could not be parsed for the signer's scheme.
    #[error("invalid signature format: {0}")]
    InvalidSignatureFormat(&'static str),

    /// Well-formed, but not produced by the claimed authorizer.
    #[error("invalid signature")]
    InvalidSignature,

    #[error("no verifier registered for signer kind {0:#06x}")]
    UnsupportedSignerKind(u16),
}

//! Signature verification, dispatched by signer kind.

mod contract;
mod ecdsa;
mod registry;

pub use contract::ContractVerifier;
pub use ecdsa::EcdsaVerifier;
pub use registry::{SignatureVerifierDyn, SignatureVerifierRegistry, VerificationRequest};

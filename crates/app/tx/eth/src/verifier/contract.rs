//! ERC-1271 verification for contract accounts.

use crate::contract_registry::{ContractAccounts, ERC1271_MAGIC_VALUE};
use crate::error::SignatureError;
use crate::verifier::{SignatureVerifierDyn, VerificationRequest};

/// Delegates to the validator registered for the claimed account.
///
/// Anything other than the magic value, including a failed call, is an
/// invalid signature.
#[derive(Clone, Debug)]
pub struct ContractVerifier {
    accounts: ContractAccounts,
}

impl ContractVerifier {
    pub fn new(accounts: ContractAccounts) -> Self {
        Self { accounts }
    }
}

impl SignatureVerifierDyn for ContractVerifier {
    fn verify(&self, request: &VerificationRequest<'_>) -> Result<(), SignatureError> {
        let validator = self
            .accounts
            .validator(&request.claimed)
            .ok_or(SignatureError::InvalidSignature)?;
        let packed = request.signature.to_packed();

        match validator.is_valid_signature(request.digest, &packed) {
            Ok(magic) if magic == ERC1271_MAGIC_VALUE => Ok(()),
            Ok(_) | Err(_) => Err(SignatureError::InvalidSignature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_registry::{SignatureValidator, ValidationCallError};
    use crate::signature::SignatureInput;
    use alloy_primitives::{Address, Bytes, B256};
    use std::sync::Arc;

    struct Fixed(Result<[u8; 4], ValidationCallError>);

    impl SignatureValidator for Fixed {
        fn is_valid_signature(
            &self,
            _digest: B256,
            _signature: &[u8],
        ) -> Result<[u8; 4], ValidationCallError> {
            self.0.clone()
        }
    }

    fn verify_with(validator: Fixed) -> Result<(), SignatureError> {
        let accounts = ContractAccounts::new();
        let wallet = Address::repeat_byte(0x42);
        accounts.register(wallet, Arc::new(validator));

        let signature = SignatureInput::Packed(Bytes::from_static(b"anything"));
        ContractVerifier::new(accounts).verify(&VerificationRequest {
            digest: B256::ZERO,
            claimed: wallet,
            signature: &signature,
        })
    }

    #[test]
    fn test_magic_value_accepts() {
        assert_eq!(verify_with(Fixed(Ok(ERC1271_MAGIC_VALUE))), Ok(()));
    }

    #[test]
    fn test_other_value_rejects() {
        assert_eq!(
            verify_with(Fixed(Ok([0xff, 0xff, 0xff, 0xff]))),
            Err(SignatureError::InvalidSignature)
        );
    }

    #[test]
    fn test_failed_call_rejects() {
        assert_eq!(
            verify_with(Fixed(Err(ValidationCallError("revert".into())))),
            Err(SignatureError::InvalidSignature)
        );
    }

    #[test]
    fn test_unregistered_account_rejects() {
        let signature = SignatureInput::Packed(Bytes::new());
        let result = ContractVerifier::new(ContractAccounts::new()).verify(&VerificationRequest {
            digest: B256::ZERO,
            claimed: Address::ZERO,
            signature: &signature,
        });
        assert_eq!(result, Err(SignatureError::InvalidSignature));
    }
}

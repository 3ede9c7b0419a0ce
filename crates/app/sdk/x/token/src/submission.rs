//! Operation inputs as submitted by relayers.

use alloy_primitives::{Address, B256, U256};
use gasless_tx_eth::{Authorization, Cancellation, SignatureInput};

/// Who submits the operation and at what block time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxContext {
    pub submitter: Address,
    pub block_time: u64,
}

impl TxContext {
    pub fn new(submitter: Address, block_time: u64) -> Self {
        Self {
            submitter,
            block_time,
        }
    }

    pub fn now(&self) -> U256 {
        U256::from(self.block_time)
    }
}

/// Second authorization of a compound operation.
///
/// The payer, payee and validity window are implied by the first leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryLeg {
    pub value: U256,
    pub nonce: B256,
    pub signature: SignatureInput,
}

/// Authorized transfer into the service burner account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBurn {
    pub authorizer: Address,
    pub value: U256,
    pub valid_after: U256,
    pub valid_before: U256,
    pub nonce: B256,
    pub signature: SignatureInput,
}

impl ServiceBurn {
    /// The transfer authorization this burn is signed as.
    pub fn authorization(&self, burner: Address) -> Authorization {
        Authorization {
            authorizer: self.authorizer,
            payee: burner,
            value: self.value,
            valid_after: self.valid_after,
            valid_before: self.valid_before,
            nonce: self.nonce,
        }
    }
}

/// Any signature-authorized operation, for single or batched submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Transfer {
        authorization: Authorization,
        signature: SignatureInput,
    },
    TransferWithCharge {
        authorization: Authorization,
        signature: SignatureInput,
        charge: SecondaryLeg,
    },
    TransferWithFeeRefund {
        authorization: Authorization,
        signature: SignatureInput,
        refund: SecondaryLeg,
    },
    BurnByService(ServiceBurn),
    Receive {
        authorization: Authorization,
        signature: SignatureInput,
    },
    Cancel {
        cancellation: Cancellation,
        signature: SignatureInput,
    },
}

impl Submission {
    pub fn name(&self) -> &'static str {
        match self {
            Submission::Transfer { .. } => "transfer_with_authorization",
            Submission::TransferWithCharge { .. } => "transfer_with_authorization_and_charge",
            Submission::TransferWithFeeRefund { .. } => {
                "transfer_with_authorization_and_fee_refund"
            }
            Submission::BurnByService(_) => "burn_by_service",
            Submission::Receive { .. } => "receive_with_authorization",
            Submission::Cancel { .. } => "cancel_authorization",
        }
    }
}

use alloy_primitives::{Address, B256, U256};

/// Events reported by a successful operation, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenEvent {
    AuthorizationConsumed {
        authorizer: Address,
        nonce: B256,
    },
    AuthorizationCanceled {
        authorizer: Address,
        nonce: B256,
    },
    ValueTransferred {
        from: Address,
        to: Address,
        value: U256,
    },
    MinterConfigured {
        minter: Address,
        allowance: U256,
    },
    Mint {
        minter: Address,
        to: Address,
        amount: U256,
    },
    Burn {
        burner: Address,
        amount: U256,
    },
    VaultUpdated {
        vault: Address,
    },
}

//! Property-based tests for ledger conservation, replay protection and the
//! validity window.

#![allow(clippy::unwrap_used)]

use alloy_primitives::{Address, B256, U256};
use gasless_testing::{open_authorization, SignatureFormat, TestAccount, TestSigner, TokenFixture};
use gasless_token::TokenError;
use gasless_tx_eth::{Authorization, AuthorizationKind, WindowStatus};
use proptest::prelude::*;

const HOLDERS: usize = 3;

fn holders() -> Vec<TestSigner> {
    (0..HOLDERS)
        .map(|i| TestSigner::Eoa(TestAccount::from_seed(&format!("holder-{i}"))))
        .collect()
}

fn arb_format() -> impl Strategy<Value = SignatureFormat> {
    prop_oneof![Just(SignatureFormat::Packed), Just(SignatureFormat::Vrs)]
}

/// `(from, to, value)` with indices into [`holders`].
fn arb_transfer() -> impl Strategy<Value = (usize, usize, u64)> {
    (0..HOLDERS, 0..HOLDERS, 0u64..2_000)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Authorized transfers never change total supply, and the sum of all
    /// balances always equals it, whether individual transfers succeed or not.
    #[test]
    fn prop_transfers_conserve_supply(
        transfers in prop::collection::vec(arb_transfer(), 1..12),
        format in arb_format(),
    ) {
        let mut fx = TokenFixture::builder().build().unwrap();
        let holders = holders();
        for holder in &holders {
            fx.fund(holder.address(), 1_000).unwrap();
        }
        let supply = fx.token.total_supply().unwrap();

        for (i, (from, to, value)) in transfers.into_iter().enumerate() {
            let signer = &holders[from];
            let authorization = open_authorization(
                signer.address(),
                holders[to].address(),
                value,
                B256::from(U256::from(i)),
            );
            let signature = fx.sign(signer, &authorization, AuthorizationKind::Transfer, format);
            let before = fx.token.balance_of(signer.address()).unwrap();

            let result =
                fx.token.transfer_with_authorization(&fx.ctx(), &authorization, &signature);

            match result {
                Ok(_) => prop_assert!(before >= authorization.value),
                Err(TokenError::InsufficientBalance { .. }) => {
                    prop_assert!(before < authorization.value);
                    prop_assert!(!fx
                        .token
                        .authorization_state(signer.address(), authorization.nonce)
                        .unwrap());
                }
                Err(other) => {
                    return Err(TestCaseError::fail(format!("unexpected error: {other}")));
                }
            }

            let sum = holders
                .iter()
                .map(|h| fx.token.balance_of(h.address()).unwrap())
                .fold(U256::ZERO, |acc, b| acc + b);
            prop_assert_eq!(sum, supply);
            prop_assert_eq!(fx.token.total_supply().unwrap(), supply);
        }
    }

    /// A consumed authorization can never be executed again, and the failed
    /// replay leaves storage untouched.
    #[test]
    fn prop_replay_is_rejected(
        value in 0u64..10_000,
        nonce in prop::array::uniform32(any::<u8>()).prop_map(B256::from),
        format in arb_format(),
    ) {
        let mut fx = TokenFixture::builder().build().unwrap();
        let alice = TestSigner::Eoa(TestAccount::from_seed("alice"));
        fx.fund(alice.address(), 10_000).unwrap();

        let authorization =
            open_authorization(alice.address(), Address::repeat_byte(0xB0), value, nonce);
        let signature = fx.sign(&alice, &authorization, AuthorizationKind::Transfer, format);

        fx.token.transfer_with_authorization(&fx.ctx(), &authorization, &signature).unwrap();
        let after_first = fx.token.storage().snapshot();

        let replay = fx.token.transfer_with_authorization(&fx.ctx(), &authorization, &signature);
        prop_assert_eq!(replay, Err(TokenError::AuthorizationAlreadyUsed));
        prop_assert_eq!(fx.token.storage().snapshot(), after_first);
    }

    /// Execution succeeds exactly when `valid_after <= now < valid_before`.
    #[test]
    fn prop_window_is_half_open(
        now in 0u64..1_000,
        valid_after in 0u64..1_000,
        valid_before in 0u64..1_000,
    ) {
        let mut fx = TokenFixture::builder().with_block_time(now).build().unwrap();
        let alice = TestSigner::Eoa(TestAccount::from_seed("alice"));
        fx.fund(alice.address(), 10).unwrap();

        let authorization = Authorization {
            valid_after: U256::from(valid_after),
            valid_before: U256::from(valid_before),
            ..open_authorization(
                alice.address(),
                Address::repeat_byte(0xB0),
                1,
                B256::repeat_byte(7),
            )
        };
        let signature =
            fx.sign(&alice, &authorization, AuthorizationKind::Transfer, SignatureFormat::Packed);
        let before = fx.token.storage().snapshot();

        let result = fx.token.transfer_with_authorization(&fx.ctx(), &authorization, &signature);

        if now < valid_after {
            prop_assert_eq!(result, Err(TokenError::AuthorizationNotYetValid));
        } else if now >= valid_before {
            prop_assert_eq!(result, Err(TokenError::AuthorizationExpired));
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(authorization.window_status(U256::from(now)), WindowStatus::Valid);
        }
        if result_failed(&fx, &authorization) {
            prop_assert_eq!(fx.token.storage().snapshot(), before);
        }
    }
}

fn result_failed(fx: &TokenFixture, authorization: &Authorization) -> bool {
    !fx.token
        .authorization_state(authorization.authorizer, authorization.nonce)
        .unwrap()
}

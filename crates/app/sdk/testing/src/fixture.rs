use std::sync::Arc;

use alloy_primitives::{keccak256, Address, B256, U256};
use gasless_storage::MemoryStorage;
use gasless_token::{FiatToken, TokenError, TxContext};
use gasless_tx_eth::{Authorization, AuthorizationKind, Cancellation, SignatureInput, SigningDomain};

use crate::{MockErc1271Wallet, SignatureFormat, TestAccount};

/// Allowance the owner grants itself as minter, 1,000,000 tokens at 6 decimals.
pub const DEFAULT_MINTER_ALLOWANCE: u64 = 1_000_000_000_000;

/// An authorizer: a plain key, or a contract wallet controlled by a key.
#[derive(Debug, Clone)]
pub enum TestSigner {
    Eoa(TestAccount),
    Contract { address: Address, owner: TestAccount },
}

impl TestSigner {
    /// The account that authorizes and holds the balance.
    pub fn address(&self) -> Address {
        match self {
            TestSigner::Eoa(account) => account.address(),
            TestSigner::Contract { address, .. } => *address,
        }
    }

    pub fn sign(&self, digest: B256, format: SignatureFormat) -> SignatureInput {
        match self {
            TestSigner::Eoa(account) => account.sign(digest, format),
            TestSigner::Contract { owner, .. } => owner.sign(digest, format),
        }
    }

    pub fn is_contract(&self) -> bool {
        matches!(self, TestSigner::Contract { .. })
    }
}

pub struct TokenFixtureBuilder {
    domain: SigningDomain,
    block_time: u64,
    with_vault: bool,
    minter_allowance: U256,
}

impl Default for TokenFixtureBuilder {
    fn default() -> Self {
        Self {
            domain: SigningDomain::new("USD Coin", "2", 1337, Address::repeat_byte(0xC0)),
            block_time: 1_700_000_000,
            with_vault: true,
            minter_allowance: U256::from(DEFAULT_MINTER_ALLOWANCE),
        }
    }
}

impl TokenFixtureBuilder {
    pub fn with_domain(self, domain: SigningDomain) -> Self {
        Self { domain, ..self }
    }

    pub fn with_block_time(self, block_time: u64) -> Self {
        Self { block_time, ..self }
    }

    pub fn without_vault(self) -> Self {
        Self {
            with_vault: false,
            ..self
        }
    }

    pub fn with_minter_allowance(self, minter_allowance: U256) -> Self {
        Self {
            minter_allowance,
            ..self
        }
    }

    /// Builds the token and configures the owner as a minter.
    pub fn build(self) -> Result<TokenFixture, TokenError> {
        let owner = TestAccount::from_seed("owner");
        let master_minter = TestAccount::from_seed("master-minter");
        let vault = TestAccount::from_seed("vault");
        let relayer = TestAccount::from_seed("relayer");

        let mut token = FiatToken::new(
            MemoryStorage::new(),
            self.domain,
            owner.address(),
            master_minter.address(),
        );
        token.configure_minter(owner.address(), owner.address(), self.minter_allowance)?;
        if self.with_vault {
            token.set_vault(owner.address(), vault.address())?;
        }

        Ok(TokenFixture {
            token,
            owner,
            master_minter,
            vault,
            relayer,
            block_time: self.block_time,
            wallets_deployed: 0,
        })
    }
}

/// A configured token plus the accounts that administer it.
pub struct TokenFixture {
    pub token: FiatToken<MemoryStorage>,
    pub owner: TestAccount,
    pub master_minter: TestAccount,
    pub vault: TestAccount,
    pub relayer: TestAccount,
    pub block_time: u64,
    wallets_deployed: u64,
}

impl TokenFixture {
    pub fn builder() -> TokenFixtureBuilder {
        TokenFixtureBuilder::default()
    }

    /// Context for a submission by the relayer at the fixture's block time.
    pub fn ctx(&self) -> TxContext {
        TxContext::new(self.relayer.address(), self.block_time)
    }

    pub fn ctx_from(&self, submitter: Address) -> TxContext {
        TxContext::new(submitter, self.block_time)
    }

    /// Mints `amount` to `to` from the owner's allowance.
    pub fn fund(&mut self, to: Address, amount: u64) -> Result<(), TokenError> {
        self.token
            .mint(self.owner.address(), to, U256::from(amount))
            .map(drop)
    }

    pub fn balance(&self, account: Address) -> Result<U256, TokenError> {
        self.token.balance_of(account)
    }

    /// Registers a fresh wallet controlled by `owner` as a contract signer.
    pub fn contract_signer(&mut self, owner: TestAccount) -> TestSigner {
        let mut preimage = owner.address().to_vec();
        preimage.extend_from_slice(&self.wallets_deployed.to_be_bytes());
        let address = Address::from_slice(&keccak256(&preimage)[12..]);
        self.wallets_deployed += 1;
        self.token
            .register_contract_account(address, Arc::new(MockErc1271Wallet::new(owner.address())));
        TestSigner::Contract { address, owner }
    }

    /// Signs `authorization` with `signer` under the token's domain.
    pub fn sign(
        &self,
        signer: &TestSigner,
        authorization: &Authorization,
        kind: AuthorizationKind,
        format: SignatureFormat,
    ) -> SignatureInput {
        signer.sign(authorization.digest(kind, self.token.domain()), format)
    }

    pub fn sign_cancellation(
        &self,
        signer: &TestSigner,
        cancellation: &Cancellation,
        format: SignatureFormat,
    ) -> SignatureInput {
        signer.sign(cancellation.digest(self.token.domain()), format)
    }
}

/// An authorization open for all time.
pub fn open_authorization(
    authorizer: Address,
    payee: Address,
    value: u64,
    nonce: B256,
) -> Authorization {
    Authorization {
        authorizer,
        payee,
        value: U256::from(value),
        valid_after: U256::ZERO,
        valid_before: U256::MAX,
        nonce,
    }
}

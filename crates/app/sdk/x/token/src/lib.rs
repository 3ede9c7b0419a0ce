//! Token ledger with gas-abstracted, signature-authorized transfers.
//!
//! A holder signs an EIP-712 authorization off-ledger and any relayer submits
//! it. [`FiatToken`] verifies the signature, enforces single use of the
//! `(authorizer, nonce)` pair and moves balances, all inside one execution
//! overlay that is committed only on success.
//!
//! Compound operations settle a user transfer together with a service charge
//! to the vault, a fee refund from the vault, or a transfer into the service
//! burner, and are atomic as a whole.

pub mod error;
pub mod events;
pub mod executor;
pub mod ledger;
pub mod registry;
pub mod roles;
pub mod submission;
pub mod token;

pub use error::TokenError;
pub use events::TokenEvent;
pub use executor::AuthorizationExecutor;
pub use ledger::Ledger;
pub use registry::AuthorizationRegistry;
pub use submission::{SecondaryLeg, ServiceBurn, Submission, TxContext};
pub use token::{EntryResult, FiatToken};

/// Execution overlay every ledger operation runs in.
pub type TokenState<'a, S> = gasless_stf::ExecutionState<'a, S, TokenEvent>;

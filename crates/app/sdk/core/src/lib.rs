//! Core types shared by the ledger crates.
//!
//! - [`ErrorCode`] and [`define_error!`] for compact storage-level errors
//! - [`ReadonlyKV`] / [`WritableKV`], the storage seams used by collections and
//!   the execution overlay
//! - [`StateChange`], the unit a committed execution hands to the backing store

#[macro_use]
pub mod error;
pub mod encoding;

pub use error::ErrorCode;

define_error!(ERR_ENCODING, 0x01, "encoding error");

pub type SdkResult<T> = Result<T, ErrorCode>;

pub trait ReadonlyKV {
    fn get(&self, key: &[u8]) -> SdkResult<Option<Vec<u8>>>;
}

pub trait WritableKV: ReadonlyKV {
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> SdkResult<()>;
    fn remove(&mut self, key: &[u8]) -> SdkResult<()>;
}

/// A single persisted mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Set { key: Vec<u8>, value: Vec<u8> },
    Remove { key: Vec<u8> },
}

impl StateChange {
    pub fn key(&self) -> &[u8] {
        match self {
            StateChange::Set { key, .. } | StateChange::Remove { key } => key,
        }
    }
}

/// A macro that ensures a condition holds true. If not, returns an error.
///
/// # Usage
///
/// ```rust
/// #[derive(Debug)]
/// enum MyError {
///     TooSmall,
/// }
///
/// fn example_function(value: i32) -> Result<(), MyError> {
///     gasless_core::ensure!(value > 10, MyError::TooSmall);
///     Ok(())
/// }
///
/// # fn main() {
/// #     example_function(11).unwrap();
/// #     assert!(example_function(3).is_err());
/// # }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

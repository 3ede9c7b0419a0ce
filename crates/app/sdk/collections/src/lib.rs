//! Typed views over a byte key-value backend.
//!
//! A collection owns a one-byte prefix; keys are `prefix || encode(key)`.
//! Collections hold no data themselves, so a schema can be a `const`.

use gasless_core::define_error;

pub mod item;
pub mod map;

#[cfg(test)]
mod mocks;

define_error!(ERR_NOT_FOUND, 0x01, "object not found");

//! Transactional execution overlay.
//!
//! Every ledger operation runs against an [`ExecutionState`] layered over the
//! committed store. Nothing reaches the store until the operation finishes
//! successfully and the caller applies [`ExecutionState::into_parts`].

pub mod errors;
pub mod execution_state;

pub use execution_state::{Checkpoint, ExecutionState};

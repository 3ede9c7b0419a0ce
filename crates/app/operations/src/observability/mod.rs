//! Observability infrastructure.
//!
//! Structured logging through `tracing`, with `RUST_LOG` taking precedence
//! over the configured level.

pub mod logging;

pub use logging::{init_logging, init_logging_from_config, parse_level, LogFormat};

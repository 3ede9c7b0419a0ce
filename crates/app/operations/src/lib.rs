//! Operations infrastructure for the gasless ledger.
//!
//! - **Config**: YAML-based configuration with fail-fast validation
//! - **Observability**: `tracing` subscriber setup
//!
//! # Example
//!
//! ```no_run
//! use gasless_operations::{init_logging_from_config, load_config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = load_config("config.yaml")?;
//!     init_logging_from_config(&config.observability)?;
//!
//!     let domain = config.domain.signing_domain();
//!     tracing::info!(separator = %domain.separator(), "domain loaded");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod observability;

pub use config::{
    load_config, load_config_from_str, AppConfig, DomainConfig, ObservabilityConfig, RolesConfig,
};
pub use errors::ConfigError;
pub use observability::{init_logging, init_logging_from_config, parse_level, LogFormat};

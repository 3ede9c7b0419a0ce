//! Configuration types.

use alloy_primitives::Address;
use gasless_tx_eth::SigningDomain;
use serde::Deserialize;

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// EIP-712 signing domain of the token.
    pub domain: DomainConfig,

    /// Fixed and initial role holders.
    pub roles: RolesConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// EIP-712 domain fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConfig {
    pub name: String,
    pub version: String,
    /// Must be > 0.
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl DomainConfig {
    pub fn signing_domain(&self) -> SigningDomain {
        SigningDomain::new(
            self.name.clone(),
            self.version.clone(),
            self.chain_id,
            self.verifying_contract,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RolesConfig {
    pub owner: Address,

    /// Also receives service burns.
    pub master_minter: Address,

    /// Initial vault for charges and fee refunds.
    #[serde(default)]
    pub vault: Option<Address>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level: trace, debug, info, warn, error. Default: info.
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,

    /// Log format: json or pretty. Default: pretty.
    #[serde(default = "ObservabilityConfig::default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            log_format: Self::default_log_format(),
        }
    }
}

impl ObservabilityConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_log_format() -> String {
        "pretty".to_string()
    }
}

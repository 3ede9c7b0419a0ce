//! Configuration validation.
//!
//! Validates configuration and collects all errors before returning,
//! enabling users to fix multiple issues in a single iteration.

use crate::config::types::{AppConfig, DomainConfig, ObservabilityConfig, RolesConfig};
use crate::errors::ConfigError;

const VALID_LEVELS: [&str; 8] = [
    "trace", "debug", "info", "warn", "warning", "error", "critical", "crit",
];
const VALID_FORMATS: [&str; 4] = ["json", "pretty", "text", "human"];

/// Validate the entire configuration.
///
/// Collects all validation errors and returns them together, allowing users
/// to fix multiple issues at once.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_domain_config(&config.domain, &mut errors);
    validate_roles_config(&config.roles, &mut errors);
    validate_observability_config(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(errors))
    }
}

fn validate_domain_config(config: &DomainConfig, errors: &mut Vec<String>) {
    if config.name.trim().is_empty() {
        errors.push("domain.name cannot be empty".to_string());
    }
    if config.version.trim().is_empty() {
        errors.push("domain.version cannot be empty".to_string());
    }
    if config.chain_id == 0 {
        errors.push("domain.chain_id must be greater than 0".to_string());
    }
}

fn validate_roles_config(config: &RolesConfig, errors: &mut Vec<String>) {
    if config.owner.is_zero() {
        errors.push("roles.owner cannot be the zero address".to_string());
    }
    if config.master_minter.is_zero() {
        errors.push("roles.master_minter cannot be the zero address".to_string());
    }
    if config.vault.is_some_and(|vault| vault.is_zero()) {
        errors.push("roles.vault cannot be the zero address".to_string());
    }
}

fn validate_observability_config(config: &ObservabilityConfig, errors: &mut Vec<String>) {
    if !VALID_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_level '{}' is invalid. Valid levels: trace, debug, info, warn, error",
            config.log_level
        ));
    }

    if !VALID_FORMATS.contains(&config.log_format.to_lowercase().as_str()) {
        errors.push(format!(
            "observability.log_format '{}' is invalid. Valid formats: json, pretty",
            config.log_format
        ));
    }
}

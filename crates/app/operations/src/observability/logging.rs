//! `tracing` subscriber setup.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ObservabilityConfig;

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Log format for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for machine parsing.
    Json,
    /// Human-readable format.
    #[default]
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Parse from string, case-insensitive. Defaults to Pretty for unknown values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        })
    }
}

/// Parse log level from string.
pub fn parse_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" | "critical" | "crit" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize logging from the observability section of the config.
pub fn init_logging_from_config(config: &ObservabilityConfig) -> Result<(), InitError> {
    let format: LogFormat = config.log_format.parse().unwrap_or_default();
    init_logging(parse_level(&config.log_level), format)
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides `level` when set. Fails if a subscriber is already
/// installed.
pub fn init_logging(level: Level, format: LogFormat) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    match format {
        LogFormat::Json => fmt().json().with_env_filter(filter).try_init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).try_init(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("Info"), Level::INFO);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("warning"), Level::WARN);
        assert_eq!(parse_level("crit"), Level::ERROR);
        assert_eq!(parse_level("unknown"), Level::INFO);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn test_second_init_fails_without_panicking() {
        let first = init_logging(Level::INFO, LogFormat::Pretty);
        let second = init_logging(Level::INFO, LogFormat::Json);
        // Another test may have installed a subscriber already.
        assert!(first.is_err() || second.is_err());
    }
}

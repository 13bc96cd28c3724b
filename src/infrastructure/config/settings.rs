//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; marketplace credentials come from
//! the environment only (see [`Credentials`]).
//!
//! # Example
//!
//! ```no_run
//! use adscout::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::blacklist::BlacklistConfig;
use super::credentials::Credentials;
use super::logging::LoggingConfig;
use super::orders::OrdersConfig;
use super::repricer::RepricerConfig;
use super::server::ServerConfig;
use crate::adapter::outbound::binance::settings::BinanceConfig;
use crate::application::anomaly::AnomalyConfig;
use crate::application::criteria::AdCriteria;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields a working configuration
/// for the USDT/TZS market.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// HTTP API listen address.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Marketplace connection, asset/fiat pair and page size.
    #[serde(default)]
    pub marketplace: BinanceConfig,

    /// Bot and outlier screening.
    #[serde(default)]
    pub anomaly: AnomalyConfig,

    /// Initial ad criteria. Adjustable at runtime through the API.
    #[serde(default)]
    pub criteria: AdCriteria,

    /// Blacklist entries applied at startup.
    #[serde(default)]
    pub blacklist: BlacklistConfig,

    /// Ad posting and leaderboard settings.
    #[serde(default)]
    pub orders: OrdersConfig,

    /// Background repricer.
    #[serde(default)]
    pub repricer: RepricerConfig,

    /// Loaded from the environment at runtime, never from the file.
    #[serde(skip)]
    pub credentials: Credentials,
}

impl Config {
    /// Parse configuration from TOML content and load credentials from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.credentials = Credentials::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the content is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Built-in defaults plus environment credentials.
    #[allow(clippy::result_large_err)]
    pub fn defaults() -> Result<Self> {
        Self::parse_toml("")
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("'{}' is not one of: pretty, json", self.logging.format),
            }
            .into());
        }

        self.marketplace.validate()?;
        self.anomaly.validate()?;
        self.criteria
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                field: "criteria",
                reason: e.to_string(),
            })?;
        self.repricer.validate()?;

        if self.orders.allowed_pay_types.is_empty() {
            return Err(ConfigError::MissingField {
                field: "orders.allowed_pay_types",
            }
            .into());
        }
        if self.orders.leaderboard_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "orders.leaderboard_size",
                reason: "must be greater than 0".into(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.marketplace.asset, "USDT");
        assert_eq!(config.marketplace.fiat, "TZS");
        assert_eq!(config.orders.leaderboard_size, 30);
        assert_eq!(config.repricer.interval_secs, 30);
        assert!(config.criteria.is_unrestricted());
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            [marketplace]
            fiat = "KES"
            page_size = 20

            [criteria]
            min_completion_rate = 90

            [blacklist]
            advertisers = ["bot-1"]
            "#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.marketplace.fiat, "KES");
        assert_eq!(config.criteria.min_completion_rate, Some(dec!(90)));
        assert_eq!(config.blacklist.advertisers, vec!["bot-1"]);
    }

    #[test]
    fn short_repricer_interval_is_rejected() {
        let config: Config = toml::from_str("[repricer]\ninterval_secs = 2").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let config: Config = toml::from_str("[logging]\nformat = \"xml\"").unwrap();
        assert!(config.validate().is_err());
    }
}

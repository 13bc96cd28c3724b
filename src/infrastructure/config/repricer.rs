//! Repricer configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapter::outbound::binance::settings::BinanceConfig;
use crate::application::repricer::{RepricerSettings, MIN_INTERVAL};
use crate::error::ConfigError;

/// Background repricer settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RepricerConfig {
    /// Start the repricer with the server when credentials are configured.
    #[serde(default = "default_autostart")]
    pub autostart: bool,
    /// Seconds between cycles. At least 5.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Fraction to undercut or outbid the best competitor by (0.005 = 0.5%).
    #[serde(default = "default_margin")]
    pub margin: Decimal,
    /// Smallest price change worth applying, in percent.
    #[serde(default = "default_min_change_pct")]
    pub min_change_pct: Decimal,
    /// Competitor ads fetched per own ad.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl RepricerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs < MIN_INTERVAL.as_secs() {
            return Err(ConfigError::InvalidValue {
                field: "repricer.interval_secs",
                reason: format!("must be at least {}", MIN_INTERVAL.as_secs()),
            });
        }
        if self.margin.is_sign_negative() || self.margin >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "repricer.margin",
                reason: "must be between 0 and 1".into(),
            });
        }
        if self.min_change_pct.is_sign_negative() {
            return Err(ConfigError::InvalidValue {
                field: "repricer.min_change_pct",
                reason: "must not be negative".into(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "repricer.page_size",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }

    /// Settings for the repricer service, bound to the marketplace pair.
    #[must_use]
    pub fn to_settings(&self, marketplace: &BinanceConfig) -> RepricerSettings {
        RepricerSettings {
            interval: Duration::from_secs(self.interval_secs),
            margin: self.margin,
            min_change_pct: self.min_change_pct,
            page_size: self.page_size,
            asset: marketplace.asset.clone(),
            fiat: marketplace.fiat.clone(),
        }
    }
}

const fn default_autostart() -> bool {
    true
}

const fn default_interval_secs() -> u64 {
    30
}

fn default_margin() -> Decimal {
    Decimal::new(5, 3)
}

fn default_min_change_pct() -> Decimal {
    Decimal::new(5, 1)
}

const fn default_page_size() -> u32 {
    20
}

impl Default for RepricerConfig {
    fn default() -> Self {
        Self {
            autostart: default_autostart(),
            interval_secs: default_interval_secs(),
            margin: default_margin(),
            min_change_pct: default_min_change_pct(),
            page_size: default_page_size(),
        }
    }
}

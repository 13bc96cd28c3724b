//! Binance C2C marketplace configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Largest page the ad search endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 20;

/// Binance C2C connection and market settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceConfig {
    /// SAPI base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Asset traded on the marketplace (e.g. `USDT`).
    #[serde(default = "default_asset")]
    pub asset: String,
    /// Fiat currency quoted (e.g. `TZS`).
    #[serde(default = "default_fiat")]
    pub fiat: String,
    /// Ads fetched per top-price lookup.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Payment methods to restrict the ad search to. Empty means any.
    #[serde(default)]
    pub pay_types: Vec<String>,
    /// `recvWindow` sent with signed requests, in milliseconds.
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
    #[serde(default)]
    pub http: BinanceHttpConfig,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            asset: default_asset(),
            fiat: default_fiat(),
            page_size: default_page_size(),
            pay_types: Vec::new(),
            recv_window_ms: default_recv_window_ms(),
            http: BinanceHttpConfig::default(),
        }
    }
}

impl BinanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.api_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "marketplace.api_url",
                reason: format!("'{}' is not a valid URL", self.api_url),
            });
        }
        if self.asset.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "marketplace.asset",
            });
        }
        if self.fiat.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "marketplace.fiat",
            });
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "marketplace.page_size",
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "marketplace.http.timeout_ms",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

fn default_api_url() -> String {
    "https://api.binance.com".into()
}

fn default_asset() -> String {
    "USDT".into()
}

fn default_fiat() -> String {
    "TZS".into()
}

const fn default_page_size() -> u32 {
    10
}

const fn default_recv_window_ms() -> u64 {
    5000
}

/// HTTP client settings for the SAPI.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Attempts for read-only requests that fail to connect or time out.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    3000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    500
}

impl Default for BinanceHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BinanceConfig::default();
        assert_eq!(config.asset, "USDT");
        assert_eq!(config.fiat, "TZS");
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_oversized_page() {
        let config = BinanceConfig {
            page_size: 50,
            ..BinanceConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

//! Anomaly screening configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ConfigError;

/// Strategy identifiers accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    MedianDeviation,
    RobustZscore,
    Reputation,
}

/// Configuration for the anomaly filter.
#[derive(Debug, Clone, Deserialize)]
pub struct AnomalyConfig {
    /// Whether screening runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Batches smaller than this are not screened at all. Never below 2.
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: usize,
    /// Enabled strategies, in evaluation order.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,
    /// Add advertisers of flagged ads to the blacklist.
    #[serde(default)]
    pub quarantine_flagged: bool,
    #[serde(default)]
    pub median_deviation: MedianDeviationConfig,
    #[serde(default)]
    pub robust_zscore: RobustZScoreConfig,
    #[serde(default)]
    pub reputation: ReputationConfig,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_sample_size: default_min_sample_size(),
            strategies: default_strategies(),
            quarantine_flagged: false,
            median_deviation: MedianDeviationConfig::default(),
            robust_zscore: RobustZScoreConfig::default(),
            reputation: ReputationConfig::default(),
        }
    }
}

impl AnomalyConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.median_deviation.max_deviation_bps <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "anomaly.median_deviation.max_deviation_bps",
                reason: "must be positive".into(),
            });
        }
        if self.robust_zscore.threshold <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "anomaly.robust_zscore.threshold",
                reason: "must be positive".into(),
            });
        }
        if self
            .reputation
            .min_completion_rate
            .is_some_and(|rate| rate.is_sign_negative() || rate > Decimal::ONE_HUNDRED)
        {
            return Err(ConfigError::InvalidValue {
                field: "anomaly.reputation.min_completion_rate",
                reason: "must be a percentage between 0 and 100".into(),
            });
        }
        Ok(())
    }
}

/// Median deviation strategy parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct MedianDeviationConfig {
    /// Widest accepted distance from the batch median, in basis points.
    #[serde(default = "default_max_deviation_bps")]
    pub max_deviation_bps: Decimal,
}

impl Default for MedianDeviationConfig {
    fn default() -> Self {
        Self {
            max_deviation_bps: default_max_deviation_bps(),
        }
    }
}

/// Robust z-score strategy parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RobustZScoreConfig {
    #[serde(default = "default_zscore_threshold")]
    pub threshold: Decimal,
}

impl Default for RobustZScoreConfig {
    fn default() -> Self {
        Self {
            threshold: default_zscore_threshold(),
        }
    }
}

/// Reputation strategy parameters. Unset bounds are not checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReputationConfig {
    /// Completion rate (percent) below which an advertiser is suspicious.
    #[serde(default)]
    pub min_completion_rate: Option<Decimal>,
    /// Order count above which the history is implausible.
    #[serde(default)]
    pub max_order_count: Option<u64>,
}

const fn default_enabled() -> bool {
    true
}

const fn default_min_sample_size() -> usize {
    3
}

fn default_strategies() -> Vec<StrategyKind> {
    vec![StrategyKind::MedianDeviation, StrategyKind::Reputation]
}

fn default_max_deviation_bps() -> Decimal {
    Decimal::from(300)
}

fn default_zscore_threshold() -> Decimal {
    Decimal::new(35, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults() {
        let config = AnomalyConfig::default();
        assert!(config.enabled);
        assert_eq!(config.min_sample_size, 3);
        assert!(!config.quarantine_flagged);
        assert_eq!(config.median_deviation.max_deviation_bps, dec!(300));
        assert_eq!(config.robust_zscore.threshold, dec!(3.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_strategy_list() {
        let config: AnomalyConfig = toml::from_str(
            r#"
            strategies = ["robust_zscore"]
            [robust_zscore]
            threshold = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.strategies, vec![StrategyKind::RobustZscore]);
        assert_eq!(config.robust_zscore.threshold, dec!(5));
    }

    #[test]
    fn rejects_non_positive_band() {
        let mut config = AnomalyConfig::default();
        config.median_deviation.max_deviation_bps = Decimal::ZERO;
        assert!(config.validate().is_err());
    }
}

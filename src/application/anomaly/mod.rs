//! Bot and outlier screening over a batch of ads.
//!
//! Every strategy judges an ad against statistics computed once over the
//! batch being screened. An ad is rejected if any enabled strategy flags it.
//!
//! - [`median::MedianDeviation`]: price too far from the batch median
//! - [`zscore::RobustZScore`]: modified z-score on median absolute deviation
//! - [`reputation::Reputation`]: thin or implausible advertiser history
//!
//! Batches smaller than the configured minimum sample size bypass screening
//! entirely and pass through unchanged, because a median over one or two
//! quotes is meaningless.

pub mod config;
pub mod median;
pub mod reputation;
pub mod zscore;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{AdRecord, Price};

pub use config::{AnomalyConfig, StrategyKind};
pub use median::MedianDeviation;
pub use reputation::Reputation;
pub use zscore::RobustZScore;

/// Smallest batch that price statistics are ever computed over.
pub const MIN_SAMPLE_FLOOR: usize = 2;

/// Robust statistics of the prices in one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    median: Price,
    mad: Decimal,
    sample_size: usize,
}

impl BatchStats {
    /// Compute statistics over the batch, `None` if it is empty.
    #[must_use]
    pub fn from_batch(batch: &[AdRecord]) -> Option<Self> {
        let prices: Vec<Price> = batch.iter().map(AdRecord::price).collect();
        let median = median_of(prices.clone())?;
        let deviations = prices.iter().map(|p| (*p - median).abs()).collect();
        let mad = median_of(deviations).unwrap_or(Decimal::ZERO);
        Some(Self {
            median,
            mad,
            sample_size: prices.len(),
        })
    }

    #[must_use]
    pub const fn median(&self) -> Price {
        self.median
    }

    /// Median absolute deviation from the median.
    #[must_use]
    pub const fn mad(&self) -> Decimal {
        self.mad
    }

    #[must_use]
    pub const fn sample_size(&self) -> usize {
        self.sample_size
    }
}

fn median_of(mut values: Vec<Decimal>) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    values.sort();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        // Midpoint without summing, so prices near `Decimal::MAX` cannot overflow.
        let (low, high) = (values[mid - 1], values[mid]);
        Some(low + (high - low) / Decimal::TWO)
    } else {
        Some(values[mid])
    }
}

/// A single anomaly heuristic.
pub trait AnomalyStrategy: Send + Sync {
    /// Short identifier used in logs and config.
    fn name(&self) -> &'static str;

    /// True if the ad looks manipulated relative to its batch.
    fn is_anomalous(&self, ad: &AdRecord, stats: &BatchStats) -> bool;
}

/// An ad rejected by screening, with the strategy that caught it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedAd {
    pub ad: AdRecord,
    pub strategy: &'static str,
}

/// Outcome of screening one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screening {
    pub accepted: Vec<AdRecord>,
    pub flagged: Vec<FlaggedAd>,
}

/// Runs the enabled strategies over a batch.
pub struct AnomalyFilter {
    strategies: Vec<Box<dyn AnomalyStrategy>>,
    min_sample_size: usize,
}

impl AnomalyFilter {
    /// Filter with no strategies. Accepts every ad.
    #[must_use]
    pub fn passthrough() -> Self {
        Self::new(MIN_SAMPLE_FLOOR)
    }

    /// Empty filter; add strategies with [`AnomalyFilter::with_strategy`].
    /// `min_sample_size` is raised to [`MIN_SAMPLE_FLOOR`] if lower.
    #[must_use]
    pub fn new(min_sample_size: usize) -> Self {
        Self {
            strategies: Vec::new(),
            min_sample_size: min_sample_size.max(MIN_SAMPLE_FLOOR),
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: impl AnomalyStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Build the filter described by configuration.
    #[must_use]
    pub fn from_config(config: &AnomalyConfig) -> Self {
        let mut filter = Self::new(config.min_sample_size);
        if !config.enabled {
            return filter;
        }
        for kind in &config.strategies {
            filter = match kind {
                StrategyKind::MedianDeviation => filter.with_strategy(MedianDeviation::new(
                    config.median_deviation.max_deviation_bps,
                )),
                StrategyKind::RobustZscore => {
                    filter.with_strategy(RobustZScore::new(config.robust_zscore.threshold))
                }
                StrategyKind::Reputation => filter.with_strategy(Reputation::new(
                    config.reputation.min_completion_rate,
                    config.reputation.max_order_count,
                )),
            };
        }
        filter
    }

    #[must_use]
    pub const fn min_sample_size(&self) -> usize {
        self.min_sample_size
    }

    /// Names of the enabled strategies, in evaluation order.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Split the batch into accepted and flagged ads.
    ///
    /// Relative order of accepted ads is preserved.
    #[must_use]
    pub fn screen(&self, batch: &[AdRecord]) -> Screening {
        let Some(stats) = BatchStats::from_batch(batch) else {
            return Screening::default();
        };
        if stats.sample_size() < self.min_sample_size {
            debug!(
                sample_size = stats.sample_size(),
                min_sample_size = self.min_sample_size,
                "Batch too small to screen"
            );
            return Screening {
                accepted: batch.to_vec(),
                flagged: Vec::new(),
            };
        }

        let mut screening = Screening::default();
        for ad in batch {
            let hit = self
                .strategies
                .iter()
                .find(|s| s.is_anomalous(ad, &stats));
            match hit {
                Some(strategy) => {
                    debug!(
                        ad_id = %ad.ad_id(),
                        advertiser = ad.display_nickname(),
                        price = %ad.price(),
                        median = %stats.median(),
                        strategy = strategy.name(),
                        "Ad flagged as anomalous"
                    );
                    screening.flagged.push(FlaggedAd {
                        ad: ad.clone(),
                        strategy: strategy.name(),
                    });
                }
                None => screening.accepted.push(ad.clone()),
            }
        }
        screening
    }

    /// Accepted ads only.
    #[must_use]
    pub fn filter(&self, batch: &[AdRecord]) -> Vec<AdRecord> {
        self.screen(batch).accepted
    }
}

impl Default for AnomalyFilter {
    fn default() -> Self {
        Self::from_config(&AnomalyConfig::default())
    }
}

impl std::fmt::Debug for AnomalyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnomalyFilter")
            .field("strategies", &self.strategy_names())
            .field("min_sample_size", &self.min_sample_size)
            .finish()
    }
}

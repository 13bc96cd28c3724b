//! Median deviation band.

use rust_decimal::Decimal;

use super::{AnomalyStrategy, BatchStats};
use crate::domain::money::deviation_bps;
use crate::domain::AdRecord;

/// Flags ads priced more than `max_deviation_bps` away from the batch median,
/// in either direction.
#[derive(Debug, Clone)]
pub struct MedianDeviation {
    max_deviation_bps: Decimal,
}

impl MedianDeviation {
    #[must_use]
    pub const fn new(max_deviation_bps: Decimal) -> Self {
        Self { max_deviation_bps }
    }
}

impl AnomalyStrategy for MedianDeviation {
    fn name(&self) -> &'static str {
        "median_deviation"
    }

    fn is_anomalous(&self, ad: &AdRecord, stats: &BatchStats) -> bool {
        deviation_bps(ad.price(), stats.median()).is_some_and(|bps| bps > self.max_deviation_bps)
    }
}

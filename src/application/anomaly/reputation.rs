//! Advertiser history heuristics.

use rust_decimal::Decimal;

use super::{AnomalyStrategy, BatchStats};
use crate::domain::AdRecord;

/// Flags advertisers whose completion rate is too low or whose order count
/// is implausibly high. Ads that do not report a value pass that check.
#[derive(Debug, Clone, Default)]
pub struct Reputation {
    min_completion_rate: Option<Decimal>,
    max_order_count: Option<u64>,
}

impl Reputation {
    #[must_use]
    pub const fn new(min_completion_rate: Option<Decimal>, max_order_count: Option<u64>) -> Self {
        Self {
            min_completion_rate,
            max_order_count,
        }
    }
}

impl AnomalyStrategy for Reputation {
    fn name(&self) -> &'static str {
        "reputation"
    }

    fn is_anomalous(&self, ad: &AdRecord, _stats: &BatchStats) -> bool {
        let low_completion = matches!(
            (ad.completion_rate(), self.min_completion_rate),
            (Some(rate), Some(min)) if rate < min
        );
        let implausible_volume = matches!(
            (ad.order_count(), self.max_order_count),
            (Some(count), Some(max)) if count > max
        );
        low_completion || implausible_volume
    }
}

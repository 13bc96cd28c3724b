//! Modified z-score on the median absolute deviation.
//!
//! `z = 0.6745 * |price - median| / MAD`. The constant scales MAD to the
//! standard deviation of a normal distribution. When MAD is zero (most of the
//! batch shares one price) the score is undefined and nothing is flagged.
//! Scores too large to represent saturate at [`Decimal::MAX`].

use rust_decimal::Decimal;

use super::{AnomalyStrategy, BatchStats};
use crate::domain::AdRecord;

const MAD_SCALE: Decimal = Decimal::from_parts(6745, 0, 0, false, 4);

#[derive(Debug, Clone)]
pub struct RobustZScore {
    threshold: Decimal,
}

impl RobustZScore {
    #[must_use]
    pub const fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }

    /// Score of one price against the batch, `None` when MAD is zero.
    #[must_use]
    pub fn score(price: Decimal, stats: &BatchStats) -> Option<Decimal> {
        if stats.mad().is_zero() {
            return None;
        }
        let score = price
            .checked_sub(stats.median())
            .and_then(|diff| MAD_SCALE.checked_mul(diff.abs()))
            .and_then(|scaled| scaled.checked_div(stats.mad()))
            .unwrap_or(Decimal::MAX);
        Some(score)
    }
}

impl AnomalyStrategy for RobustZScore {
    fn name(&self) -> &'static str {
        "robust_zscore"
    }

    fn is_anomalous(&self, ad: &AdRecord, stats: &BatchStats) -> bool {
        Self::score(ad.price(), stats).is_some_and(|z| z > self.threshold)
    }
}

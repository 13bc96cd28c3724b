//! Operator-tunable eligibility criteria for ads.
//!
//! Criteria run before anomaly screening. A bound that is not set accepts
//! everything; an ad that does not report the field being bounded passes
//! that bound, so sparse marketplace data never hides an ad on its own.

use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{AdRecord, Amount};
use crate::error::ValidationError;

const MAX_COMPLETION_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Bounds an ad must satisfy to be considered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCriteria {
    /// Floor on the ad's minimum single-transaction amount.
    #[serde(default)]
    pub min_limit: Option<Amount>,
    /// Ceiling on the ad's maximum single-transaction amount.
    #[serde(default)]
    pub max_limit: Option<Amount>,
    /// Floor on the asset quantity still available.
    #[serde(default)]
    pub min_available: Option<Amount>,
    /// Floor on the advertiser's completion rate, in percent.
    #[serde(default)]
    pub min_completion_rate: Option<Amount>,
    /// Floor on the advertiser's recent order count.
    #[serde(default)]
    pub min_order_count: Option<u64>,
}

impl AdCriteria {
    /// True if the ad satisfies every configured bound.
    #[must_use]
    pub fn admits(&self, ad: &AdRecord) -> bool {
        at_least(ad.min_amount(), self.min_limit)
            && at_most(ad.max_amount(), self.max_limit)
            && at_least(ad.available(), self.min_available)
            && at_least(ad.completion_rate(), self.min_completion_rate)
            && at_least(ad.order_count(), self.min_order_count)
    }

    /// True when no bound is set.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }

    /// Validate the bounds against each other.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("min_limit", self.min_limit),
            ("max_limit", self.max_limit),
            ("min_available", self.min_available),
            ("min_completion_rate", self.min_completion_rate),
        ] {
            if value.is_some_and(|v| v.is_sign_negative()) {
                return Err(ValidationError::InvalidValue {
                    field,
                    reason: "must not be negative".into(),
                });
            }
        }
        if self
            .min_completion_rate
            .is_some_and(|rate| rate > MAX_COMPLETION_RATE)
        {
            return Err(ValidationError::InvalidValue {
                field: "min_completion_rate",
                reason: "must be a percentage between 0 and 100".into(),
            });
        }
        if let (Some(min), Some(max)) = (self.min_limit, self.max_limit) {
            if min > max {
                return Err(ValidationError::InvalidValue {
                    field: "min_limit",
                    reason: format!("{min} exceeds max_limit {max}"),
                });
            }
        }
        Ok(())
    }

    /// Overlay the fields present in `update`.
    #[must_use]
    pub fn merged(&self, update: &CriteriaUpdate) -> Self {
        Self {
            min_limit: update.min_limit.or(self.min_limit),
            max_limit: update.max_limit.or(self.max_limit),
            min_available: update.min_available.or(self.min_available),
            min_completion_rate: update.min_completion_rate.or(self.min_completion_rate),
            min_order_count: update.min_order_count.or(self.min_order_count),
        }
    }
}

fn at_least<T: PartialOrd>(value: Option<T>, floor: Option<T>) -> bool {
    match (value, floor) {
        (Some(value), Some(floor)) => value >= floor,
        _ => true,
    }
}

fn at_most<T: PartialOrd>(value: Option<T>, ceiling: Option<T>) -> bool {
    match (value, ceiling) {
        (Some(value), Some(ceiling)) => value <= ceiling,
        _ => true,
    }
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CriteriaUpdate {
    #[serde(default)]
    pub min_limit: Option<Amount>,
    #[serde(default)]
    pub max_limit: Option<Amount>,
    #[serde(default)]
    pub min_available: Option<Amount>,
    #[serde(default)]
    pub min_completion_rate: Option<Amount>,
    #[serde(default)]
    pub min_order_count: Option<u64>,
}

impl CriteriaUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Shared, runtime-adjustable criteria.
#[derive(Debug, Default)]
pub struct CriteriaStore {
    current: RwLock<AdCriteria>,
}

impl CriteriaStore {
    #[must_use]
    pub fn new(initial: AdCriteria) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Copy of the criteria in force.
    #[must_use]
    pub fn current(&self) -> AdCriteria {
        self.current.read().clone()
    }

    /// Apply a partial update, rejecting it whole if the result is invalid.
    pub fn update(&self, update: &CriteriaUpdate) -> Result<AdCriteria, ValidationError> {
        let mut guard = self.current.write();
        let next = guard.merged(update);
        next.validate()?;
        *guard = next.clone();
        info!(criteria = ?next, "Ad criteria updated");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeType;
    use rust_decimal_macros::dec;

    fn ad() -> AdRecord {
        AdRecord::try_new("ad-1", "user-1", dec!(2950), TradeType::Sell)
            .unwrap()
            .with_limits(Some(dec!(10000)), Some(dec!(500000)))
            .with_available(Some(dec!(120)))
            .with_reputation(Some(dec!(97.5)), Some(240))
    }

    #[test]
    fn unrestricted_admits_everything() {
        assert!(AdCriteria::default().admits(&ad()));
        assert!(AdCriteria::default().is_unrestricted());
    }

    #[test]
    fn each_bound_is_applied() {
        let cases = [
            AdCriteria { min_limit: Some(dec!(20000)), ..Default::default() },
            AdCriteria { max_limit: Some(dec!(100000)), ..Default::default() },
            AdCriteria { min_available: Some(dec!(500)), ..Default::default() },
            AdCriteria { min_completion_rate: Some(dec!(99)), ..Default::default() },
            AdCriteria { min_order_count: Some(1000), ..Default::default() },
        ];
        for criteria in cases {
            assert!(!criteria.admits(&ad()), "{criteria:?} should reject");
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let criteria = AdCriteria {
            min_limit: Some(dec!(10000)),
            max_limit: Some(dec!(500000)),
            min_available: Some(dec!(120)),
            min_completion_rate: Some(dec!(97.5)),
            min_order_count: Some(240),
        };
        assert!(criteria.admits(&ad()));
    }

    #[test]
    fn missing_ad_fields_pass() {
        let sparse = AdRecord::try_new("ad-2", "user-2", dec!(2950), TradeType::Sell).unwrap();
        let criteria = AdCriteria {
            min_completion_rate: Some(dec!(90)),
            min_order_count: Some(50),
            ..Default::default()
        };
        assert!(criteria.admits(&sparse));
    }

    #[test]
    fn validate_rejects_inverted_limits() {
        let criteria = AdCriteria {
            min_limit: Some(dec!(500)),
            max_limit: Some(dec!(100)),
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn validate_rejects_rates_above_hundred() {
        let criteria = AdCriteria {
            min_completion_rate: Some(dec!(101)),
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn update_keeps_absent_fields() {
        let store = CriteriaStore::new(AdCriteria {
            min_order_count: Some(10),
            ..Default::default()
        });
        let updated = store
            .update(&CriteriaUpdate {
                min_available: Some(dec!(5)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.min_order_count, Some(10));
        assert_eq!(updated.min_available, Some(dec!(5)));
        assert_eq!(store.current(), updated);
    }

    #[test]
    fn invalid_update_leaves_store_untouched() {
        let store = CriteriaStore::new(AdCriteria::default());
        let result = store.update(&CriteriaUpdate {
            min_limit: Some(dec!(-1)),
            ..Default::default()
        });

        assert!(result.is_err());
        assert!(store.current().is_unrestricted());
    }
}

//! Selection outcomes.

use std::collections::BTreeMap;

use serde::Serialize;

use super::ad::AdRecord;
use super::id::{AdId, AdvertiserId};
use super::money::Price;
use super::trade::TradeType;

/// The winning ad of one selection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestAd {
    pub price: Price,
    pub nickname: String,
    pub ad_id: AdId,
    pub advertiser_id: AdvertiserId,
}

impl From<&AdRecord> for BestAd {
    fn from(ad: &AdRecord) -> Self {
        Self {
            price: ad.price(),
            nickname: ad.display_nickname().to_string(),
            ad_id: ad.ad_id().clone(),
            advertiser_id: ad.advertiser_id().clone(),
        }
    }
}

/// Result of one selection run: `None` when no ad survived filtering.
pub type SelectionResult = Option<BestAd>;

/// Per-direction selection results.
///
/// A direction is present iff it was evaluated, so "ran and found nothing"
/// (`Some(None)` from [`TopPrices::get`]) is distinct from "did not run"
/// (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopPrices {
    results: BTreeMap<TradeType, SelectionResult>,
}

impl TopPrices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one direction, replacing any previous one.
    pub fn insert(&mut self, trade_type: TradeType, result: SelectionResult) {
        self.results.insert(trade_type, result);
    }

    /// Outcome for a direction, if that direction was evaluated.
    #[must_use]
    pub fn get(&self, trade_type: TradeType) -> Option<&SelectionResult> {
        self.results.get(&trade_type)
    }

    /// True when the direction was evaluated.
    #[must_use]
    pub fn contains(&self, trade_type: TradeType) -> bool {
        self.results.contains_key(&trade_type)
    }

    /// Evaluated directions with their outcomes, BUY first.
    pub fn iter(&self) -> impl Iterator<Item = (TradeType, &SelectionResult)> {
        self.results.iter().map(|(side, result)| (*side, result))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn distinguishes_empty_result_from_missing_direction() {
        let mut prices = TopPrices::new();
        prices.insert(TradeType::Buy, None);

        assert_eq!(prices.get(TradeType::Buy), Some(&None));
        assert_eq!(prices.get(TradeType::Sell), None);
        assert!(prices.contains(TradeType::Buy));
        assert!(!prices.contains(TradeType::Sell));
    }

    #[test]
    fn best_ad_uses_unknown_for_missing_nickname() {
        let ad = AdRecord::try_new("ad-9", "adv-9", dec!(2960), TradeType::Sell).unwrap();
        let best = BestAd::from(&ad);
        assert_eq!(best.nickname, "Unknown");
        assert_eq!(best.price, dec!(2960));
    }
}

//! Best-price selection over one batch of ads.
//!
//! The pipeline, applied to a single page returned by the marketplace:
//!
//! 1. drop ads on the wrong side of the book for the requested direction
//! 2. drop blacklisted advertisers and ads
//! 3. drop ads outside the operator's criteria
//! 4. screen the survivors for anomalies
//! 5. rank what remains by price, best first
//!
//! An operator buying the asset is matched against SELL-side ads and wants the
//! lowest price; an operator selling is matched against BUY-side ads and wants
//! the highest. Equal prices are broken by higher order count, then higher
//! completion rate (a reported value beats none), then marketplace order.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use super::anomaly::AnomalyFilter;
use super::blacklist::{BlacklistKind, BlacklistStore};
use super::criteria::CriteriaStore;
use crate::domain::{AdRecord, BestAd, SelectionResult, TradeType};

/// Applies exclusions, criteria and anomaly screening, then picks the best ad.
#[derive(Debug)]
pub struct PriceSelector {
    blacklist: Arc<BlacklistStore>,
    criteria: Arc<CriteriaStore>,
    anomaly: AnomalyFilter,
    quarantine_flagged: bool,
}

impl PriceSelector {
    #[must_use]
    pub fn new(
        blacklist: Arc<BlacklistStore>,
        criteria: Arc<CriteriaStore>,
        anomaly: AnomalyFilter,
    ) -> Self {
        Self {
            blacklist,
            criteria,
            anomaly,
            quarantine_flagged: false,
        }
    }

    /// Add advertisers of flagged ads to the blacklist after each call.
    #[must_use]
    pub const fn with_quarantine(mut self, enabled: bool) -> Self {
        self.quarantine_flagged = enabled;
        self
    }

    /// Eligible ads for an operator trading in `trade_type`, best first.
    #[must_use]
    pub fn rank(&self, batch: &[AdRecord], trade_type: TradeType) -> Vec<AdRecord> {
        let blacklist = self.blacklist.snapshot();
        let criteria = self.criteria.current();
        let wanted_side = trade_type.counterparty();

        let candidates: Vec<AdRecord> = batch
            .iter()
            .filter(|ad| ad.trade_type() == wanted_side)
            .filter(|ad| !blacklist.is_excluded(ad))
            .filter(|ad| criteria.admits(ad))
            .cloned()
            .collect();

        let screening = self.anomaly.screen(&candidates);
        debug!(
            trade_type = %trade_type,
            fetched = batch.len(),
            candidates = candidates.len(),
            flagged = screening.flagged.len(),
            "Screened ad batch"
        );

        if self.quarantine_flagged {
            for flagged in &screening.flagged {
                if self
                    .blacklist
                    .add(BlacklistKind::Advertiser, flagged.ad.advertiser_id().as_str())
                {
                    info!(
                        advertiser = flagged.ad.display_nickname(),
                        strategy = flagged.strategy,
                        "Quarantined anomalous advertiser"
                    );
                }
            }
        }

        let mut ranked = screening.accepted;
        ranked.sort_by(|a, b| compare_ads(trade_type, a, b));
        ranked
    }

    /// The single best eligible ad, if any.
    #[must_use]
    pub fn select_best(&self, batch: &[AdRecord], trade_type: TradeType) -> SelectionResult {
        self.rank(batch, trade_type).first().map(BestAd::from)
    }
}

/// Ordering used by [`PriceSelector::rank`]: `Less` means `a` is better.
#[must_use]
pub fn compare_ads(trade_type: TradeType, a: &AdRecord, b: &AdRecord) -> Ordering {
    let by_price = match trade_type {
        TradeType::Buy => a.price().cmp(&b.price()),
        TradeType::Sell => b.price().cmp(&a.price()),
    };
    by_price
        .then_with(|| b.order_count().cmp(&a.order_count()))
        .then_with(|| b.completion_rate().cmp(&a.completion_rate()))
}

//! Background repricing of the operator's own ads.
//!
//! Each cycle lists the operator's ONLINE ads, fetches the competing page for
//! each one, runs it through the same [`PriceSelector`] used for top-price
//! lookups (so blacklist, criteria and anomaly screening apply), and moves
//! the ad just inside the best competitor.
//!
//! ```text
//! SELL ad: competitors are other SELL ads, lowest wins  -> best * (1 - margin)
//! BUY ad:  competitors are other BUY ads, highest wins  -> best * (1 + margin)
//! ```
//!
//! Changes smaller than `min_change_pct` are skipped to avoid churning the ad.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::selector::PriceSelector;
use crate::domain::money::round_price;
use crate::domain::{AdRecord, OwnAd, Price, TradeType};
use crate::error::{UpstreamError, ValidationError};
use crate::port::{AdSource, MerchantDesk};

/// Shortest interval between cycles.
pub const MIN_INTERVAL: Duration = Duration::from_secs(5);

/// Repricer tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepricerSettings {
    /// Default cycle interval.
    pub interval: Duration,
    /// Fraction to undercut (SELL) or outbid (BUY) the best competitor by.
    pub margin: Decimal,
    /// Smallest change, in percent of the current price, worth applying.
    pub min_change_pct: Decimal,
    /// Competitor page size.
    pub page_size: u32,
    /// Asset the ad source quotes; own ads in other assets are skipped.
    pub asset: String,
    /// Fiat the ad source quotes; own ads in other fiats are skipped.
    pub fiat: String,
}

impl Default for RepricerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            margin: Decimal::new(5, 3),
            min_change_pct: Decimal::new(5, 1),
            page_size: 20,
            asset: "USDT".into(),
            fiat: "TZS".into(),
        }
    }
}

/// Target price for an own ad given the best competing price.
///
/// `None` when the target is not representable.
#[must_use]
pub fn target_price(best: Price, own_side: TradeType, margin: Decimal) -> Option<Price> {
    let factor = match own_side {
        TradeType::Sell => Decimal::ONE.checked_sub(margin)?,
        TradeType::Buy => Decimal::ONE.checked_add(margin)?,
    };
    best.checked_mul(factor).map(round_price)
}

/// True when moving from `current` to `target` is a big enough change.
#[must_use]
pub fn needs_update(current: Price, target: Price, min_change_pct: Decimal) -> bool {
    if current <= Decimal::ZERO {
        return target > Decimal::ZERO;
    }
    target
        .checked_sub(current)
        .and_then(|diff| diff.abs().checked_div(current))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(true, |change_pct| change_pct >= min_change_pct)
}

/// What happened to one ad in a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepriceOutcome {
    Updated { from: Price, to: Price },
    Unchanged,
    NoCompetitor,
    Skipped,
}

/// Totals for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub online_ads: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Repricer state as reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepricerStatus {
    pub running: bool,
    pub interval_secs: u64,
    pub cycles: u64,
    pub ads_updated: u64,
    pub last_run: Option<DateTime<Utc>>,
}

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

struct Running {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Periodic repricer with start/stop control.
pub struct Repricer {
    desk: Arc<dyn MerchantDesk>,
    source: Arc<dyn AdSource>,
    selector: Arc<PriceSelector>,
    settings: RepricerSettings,
    interval: Mutex<Duration>,
    running: Mutex<Option<Running>>,
    cycles: AtomicU64,
    ads_updated: AtomicU64,
    last_run: Mutex<Option<DateTime<Utc>>>,
}

impl Repricer {
    #[must_use]
    pub fn new(
        desk: Arc<dyn MerchantDesk>,
        source: Arc<dyn AdSource>,
        selector: Arc<PriceSelector>,
        settings: RepricerSettings,
    ) -> Self {
        let interval = settings.interval.max(MIN_INTERVAL);
        Self {
            desk,
            source,
            selector,
            settings,
            interval: Mutex::new(interval),
            running: Mutex::new(None),
            cycles: AtomicU64::new(0),
            ads_updated: AtomicU64::new(0),
            last_run: Mutex::new(None),
        }
    }

    /// Start the background loop, optionally with a new interval.
    ///
    /// The first cycle runs immediately.
    ///
    /// # Errors
    ///
    /// Rejects intervals shorter than [`MIN_INTERVAL`].
    pub fn start(
        self: &Arc<Self>,
        interval: Option<Duration>,
    ) -> Result<StartOutcome, ValidationError> {
        if let Some(interval) = interval {
            if interval < MIN_INTERVAL {
                return Err(ValidationError::InvalidValue {
                    field: "interval",
                    reason: format!("must be at least {} seconds", MIN_INTERVAL.as_secs()),
                });
            }
        }

        let mut running = self.running.lock();
        if running.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let interval = {
            let mut current = self.interval.lock();
            if let Some(interval) = interval {
                *current = interval;
            }
            *current
        };

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let repricer = Arc::clone(self);
        let handle = tokio::spawn(async move { repricer.run_loop(interval, shutdown_rx).await });
        *running = Some(Running { shutdown_tx, handle });

        info!(interval_secs = interval.as_secs(), "Repricer started");
        Ok(StartOutcome::Started)
    }

    /// Signal the loop to stop. Returns `false` if it was not running.
    pub fn stop(&self) -> bool {
        let Some(running) = self.running.lock().take() else {
            return false;
        };
        let was_running = !running.handle.is_finished();
        let _ = running.shutdown_tx.send(true);
        if was_running {
            info!("Repricer stopped");
        }
        was_running
    }

    #[must_use]
    pub fn status(&self) -> RepricerStatus {
        RepricerStatus {
            running: self
                .running
                .lock()
                .as_ref()
                .is_some_and(|r| !r.handle.is_finished()),
            interval_secs: self.interval.lock().as_secs(),
            cycles: self.cycles.load(Ordering::Relaxed),
            ads_updated: self.ads_updated.load(Ordering::Relaxed),
            last_run: *self.last_run.lock(),
        }
    }

    async fn run_loop(self: Arc<Self>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    debug!("Repricer loop received shutdown");
                    break;
                }
                _ = ticker.tick() => {
                    let report = self.run_cycle().await;
                    debug!(?report, "Repricer cycle finished");
                }
            }
        }
    }

    /// Run one repricing pass over the operator's online ads.
    ///
    /// Failures are logged and counted; a failed ad never stops the cycle.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();
        self.cycles.fetch_add(1, Ordering::Relaxed);
        *self.last_run.lock() = Some(Utc::now());

        let ads = match self.desk.own_ads().await {
            Ok(ads) => ads,
            Err(e) => {
                warn!(error = %e, "Could not list own ads");
                report.failed += 1;
                return report;
            }
        };
        let online: Vec<OwnAd> = ads.into_iter().filter(OwnAd::is_online).collect();
        report.online_ads = online.len();
        if online.is_empty() {
            info!("No online ads to reprice");
            return report;
        }

        let own_nickname = match self.desk.own_nickname().await {
            Ok(nickname) => Some(nickname),
            Err(e) => {
                warn!(
                    error = %e,
                    "Could not resolve own nickname; own ads may be compared against"
                );
                None
            }
        };

        for ad in &online {
            match self.reprice(ad, own_nickname.as_deref()).await {
                Ok(RepriceOutcome::Updated { from, to }) => {
                    info!(
                        ad_id = %ad.ad_id,
                        trade_type = %ad.trade_type,
                        %from,
                        %to,
                        "Ad repriced"
                    );
                    report.updated += 1;
                    self.ads_updated.fetch_add(1, Ordering::Relaxed);
                }
                Ok(outcome) => {
                    debug!(ad_id = %ad.ad_id, ?outcome, "Ad left unchanged");
                    report.unchanged += 1;
                }
                Err(e) => {
                    warn!(ad_id = %ad.ad_id, error = %e, "Repricing failed");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Reprice one ad.
    pub async fn reprice(
        &self,
        ad: &OwnAd,
        own_nickname: Option<&str>,
    ) -> Result<RepriceOutcome, UpstreamError> {
        if !ad.asset.eq_ignore_ascii_case(&self.settings.asset)
            || !ad.fiat.eq_ignore_ascii_case(&self.settings.fiat)
        {
            return Ok(RepriceOutcome::Skipped);
        }

        // Competitors share our side, so they are what an operator trading
        // the opposite direction would see.
        let direction = ad.trade_type.counterparty();
        let batch = self
            .source
            .fetch_ads(direction, 1, self.settings.page_size)
            .await?;
        let competitors: Vec<AdRecord> = batch
            .into_iter()
            .filter(|c| c.ad_id() != &ad.ad_id)
            .filter(|c| own_nickname.map_or(true, |own| c.advertiser_nickname() != Some(own)))
            .collect();

        let Some(best) = self.selector.select_best(&competitors, direction) else {
            return Ok(RepriceOutcome::NoCompetitor);
        };

        let Some(target) = target_price(best.price, ad.trade_type, self.settings.margin) else {
            warn!(ad_id = %ad.ad_id, best = %best.price, "Target price out of range");
            return Ok(RepriceOutcome::Unchanged);
        };
        if !needs_update(ad.price, target, self.settings.min_change_pct) {
            return Ok(RepriceOutcome::Unchanged);
        }

        self.desk.update_ad_price(&ad.ad_id, target).await?;
        Ok(RepriceOutcome::Updated {
            from: ad.price,
            to: target,
        })
    }
}

impl Drop for Repricer {
    fn drop(&mut self) {
        if let Some(running) = self.running.get_mut().take() {
            let _ = running.shutdown_tx.send(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sell_ads_undercut_and_buy_ads_outbid() {
        assert_eq!(target_price(dec!(3000), TradeType::Sell, dec!(0.005)), Some(dec!(2985)));
        assert_eq!(target_price(dec!(3000), TradeType::Buy, dec!(0.005)), Some(dec!(3015)));
    }

    #[test]
    fn target_is_rounded_to_cents() {
        assert_eq!(
            target_price(dec!(2951.37), TradeType::Sell, dec!(0.005)),
            Some(dec!(2936.61))
        );
    }

    #[test]
    fn extreme_prices_do_not_panic() {
        assert_eq!(target_price(Decimal::MAX, TradeType::Buy, dec!(0.005)), None);
        assert!(needs_update(dec!(0.0000001), Decimal::MAX, dec!(0.5)));
    }

    #[test]
    fn small_changes_are_skipped() {
        assert!(!needs_update(dec!(3000), dec!(3010), dec!(0.5)));
        assert!(needs_update(dec!(3000), dec!(3015), dec!(0.5)));
        assert!(needs_update(dec!(3000), dec!(2900), dec!(0.5)));
    }

    #[test]
    fn default_settings() {
        let settings = RepricerSettings::default();
        assert_eq!(settings.interval, Duration::from_secs(30));
        assert_eq!(settings.margin, dec!(0.005));
        assert_eq!(settings.min_change_pct, dec!(0.5));
    }
}

//! Composition root: builds the application services from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::inbound::http::ApiState;
use crate::adapter::outbound::binance::{BinanceC2cClient, HmacSigner};
use crate::application::{
    AnomalyFilter, BlacklistStore, CriteriaStore, LeaderboardService, OrderDesk, PriceSelector,
    Repricer, TopPriceService,
};
use crate::infrastructure::config::settings::Config;
use crate::port::{AdSource, MerchantDesk, RequestSigner};

/// Build the request signer from environment credentials.
///
/// Missing credentials yield a signer that fails every signed call with
/// `MissingCredentials`, so read-only commands still start.
#[must_use]
pub fn build_signer(config: &Config) -> Arc<dyn RequestSigner> {
    let credentials = &config.credentials;
    if !credentials.is_complete() {
        warn!("ADSCOUT_API_KEY / ADSCOUT_API_SECRET not set; marketplace calls will fail");
    }
    Arc::new(HmacSigner::new(
        credentials.api_key.clone().unwrap_or_default(),
        credentials.api_secret.clone().unwrap_or_default(),
    ))
}

/// Build the Binance client used as both ad source and merchant desk.
#[must_use]
pub fn build_client(config: &Config) -> Arc<BinanceC2cClient> {
    Arc::new(BinanceC2cClient::from_config(
        &config.marketplace,
        build_signer(config),
    ))
}

/// Build the shared price selector (blacklist, criteria, anomaly screening).
#[must_use]
pub fn build_selector(
    config: &Config,
    blacklist: Arc<BlacklistStore>,
    criteria: Arc<CriteriaStore>,
) -> Arc<PriceSelector> {
    let anomaly = AnomalyFilter::from_config(&config.anomaly);
    info!(
        strategies = ?anomaly.strategy_names(),
        min_sample_size = anomaly.min_sample_size(),
        "Anomaly screening configured"
    );
    Arc::new(
        PriceSelector::new(blacklist, criteria, anomaly)
            .with_quarantine(config.anomaly.quarantine_flagged),
    )
}

/// Wire every service against the given marketplace ports.
#[must_use]
pub fn build_state_with(
    config: &Config,
    source: Arc<dyn AdSource>,
    desk: Arc<dyn MerchantDesk>,
) -> ApiState {
    let marketplace = &config.marketplace;

    let blacklist = Arc::new(BlacklistStore::with_entries(
        config.blacklist.advertisers.iter().cloned(),
        config.blacklist.ads.iter().cloned(),
    ));
    let criteria = Arc::new(CriteriaStore::new(config.criteria.clone()));
    let selector = build_selector(config, Arc::clone(&blacklist), Arc::clone(&criteria));

    let top_prices = Arc::new(TopPriceService::new(
        Arc::clone(&source),
        Arc::clone(&selector),
        marketplace.page_size,
    ));
    let leaderboard = Arc::new(LeaderboardService::new(
        Arc::clone(&desk),
        marketplace.asset.clone(),
        marketplace.fiat.clone(),
        config.orders.leaderboard_size,
    ));
    let orders = Arc::new(OrderDesk::new(
        Arc::clone(&desk),
        marketplace.asset.clone(),
        marketplace.fiat.clone(),
        config.orders.allowed_pay_types.clone(),
    ));
    let repricer = Arc::new(Repricer::new(
        desk,
        source,
        selector,
        config.repricer.to_settings(marketplace),
    ));

    ApiState {
        top_prices,
        leaderboard,
        orders,
        blacklist,
        criteria,
        repricer,
    }
}

/// Wire every service against the Binance C2C API.
#[must_use]
pub fn build_state(config: &Config) -> ApiState {
    let client = build_client(config);
    info!(
        api_url = %config.marketplace.api_url,
        asset = %config.marketplace.asset,
        fiat = %config.marketplace.fiat,
        "Marketplace client ready"
    );
    build_state_with(config, client.clone(), client)
}

//! Scripted marketplace fakes.
//!
//! - [`ScriptedAdSource`] - Fixed ads (or a failure) per direction, with a
//!   log of every fetch.
//! - [`FakeDesk`] - In-memory merchant account recording every mutation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::domain::{AdId, AdRecord, NewAd, OrderRecord, OwnAd, Price, TradeType};
use crate::error::UpstreamError;
use crate::port::{AdSource, MerchantDesk, OrderHistoryQuery};

/// One recorded `fetch_ads` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchCall {
    pub trade_type: TradeType,
    pub page: u32,
    pub page_size: u32,
}

/// Ad source returning scripted batches keyed by the requested direction.
///
/// Directions without a script return an empty batch.
#[derive(Default)]
pub struct ScriptedAdSource {
    scripts: Mutex<HashMap<TradeType, Result<Vec<AdRecord>, UpstreamError>>>,
    calls: AtomicU32,
    log: Mutex<Vec<FetchCall>>,
}

impl ScriptedAdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ads returned when an operator trading `trade_type` searches.
    pub fn with_ads(self, trade_type: TradeType, ads: Vec<AdRecord>) -> Self {
        self.set_ads(trade_type, ads);
        self
    }

    /// Make searches in `trade_type` fail with `error`.
    pub fn with_failure(self, trade_type: TradeType, error: UpstreamError) -> Self {
        self.scripts.lock().insert(trade_type, Err(error));
        self
    }

    /// Replace the batch for a direction after construction.
    pub fn set_ads(&self, trade_type: TradeType, ads: Vec<AdRecord>) {
        self.scripts.lock().insert(trade_type, Ok(ads));
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> Vec<FetchCall> {
        self.log.lock().clone()
    }
}

#[async_trait]
impl AdSource for ScriptedAdSource {
    async fn fetch_ads(
        &self,
        trade_type: TradeType,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<AdRecord>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().push(FetchCall {
            trade_type,
            page,
            page_size,
        });
        match self.scripts.lock().get(&trade_type) {
            Some(Ok(ads)) => Ok(ads.clone()),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(Vec::new()),
        }
    }

    fn marketplace_name(&self) -> &'static str {
        "Scripted"
    }
}

/// In-memory merchant account.
pub struct FakeDesk {
    nickname: String,
    orders: Mutex<Vec<OrderRecord>>,
    own_ads: Mutex<Vec<OwnAd>>,
    failure: Mutex<Option<UpstreamError>>,
    posted: Mutex<Vec<NewAd>>,
    released: Mutex<Vec<String>>,
    price_updates: Mutex<Vec<(AdId, Price)>>,
    order_queries: Mutex<Vec<OrderHistoryQuery>>,
}

impl Default for FakeDesk {
    fn default() -> Self {
        Self {
            nickname: "operator".into(),
            orders: Mutex::new(Vec::new()),
            own_ads: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            posted: Mutex::new(Vec::new()),
            released: Mutex::new(Vec::new()),
            price_updates: Mutex::new(Vec::new()),
            order_queries: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = nickname.to_string();
        self
    }

    pub fn with_orders(self, orders: Vec<OrderRecord>) -> Self {
        *self.orders.lock() = orders;
        self
    }

    pub fn with_own_ads(self, ads: Vec<OwnAd>) -> Self {
        *self.own_ads.lock() = ads;
        self
    }

    /// Make every call fail with `error` until [`FakeDesk::recover`].
    pub fn fail_with(&self, error: UpstreamError) {
        *self.failure.lock() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    pub fn posted(&self) -> Vec<NewAd> {
        self.posted.lock().clone()
    }

    pub fn released(&self) -> Vec<String> {
        self.released.lock().clone()
    }

    pub fn price_updates(&self) -> Vec<(AdId, Price)> {
        self.price_updates.lock().clone()
    }

    pub fn order_queries(&self) -> Vec<OrderHistoryQuery> {
        self.order_queries.lock().clone()
    }

    /// Current state of the operator's ads, including applied price updates.
    pub fn own_ads_snapshot(&self) -> Vec<OwnAd> {
        self.own_ads.lock().clone()
    }

    fn check(&self) -> Result<(), UpstreamError> {
        match self.failure.lock().as_ref() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MerchantDesk for FakeDesk {
    async fn post_ad(&self, ad: &NewAd) -> Result<Value, UpstreamError> {
        self.check()?;
        let mut posted = self.posted.lock();
        posted.push(ad.clone());
        Ok(json!({
            "code": "000000",
            "success": true,
            "data": format!("new-ad-{}", posted.len()),
        }))
    }

    async fn release_order(&self, order_number: &str) -> Result<Value, UpstreamError> {
        self.check()?;
        self.released.lock().push(order_number.to_string());
        Ok(json!({
            "code": "000000",
            "success": true,
            "data": { "orderNumber": order_number },
        }))
    }

    async fn list_orders(
        &self,
        query: &OrderHistoryQuery,
    ) -> Result<Vec<OrderRecord>, UpstreamError> {
        self.check()?;
        self.order_queries.lock().push(query.clone());
        Ok(self.orders.lock().clone())
    }

    async fn own_ads(&self) -> Result<Vec<OwnAd>, UpstreamError> {
        self.check()?;
        Ok(self.own_ads.lock().clone())
    }

    async fn update_ad_price(&self, ad_id: &AdId, price: Price) -> Result<(), UpstreamError> {
        self.check()?;
        self.price_updates.lock().push((ad_id.clone(), price));
        if let Some(ad) = self.own_ads.lock().iter_mut().find(|ad| &ad.ad_id == ad_id) {
            ad.price = price;
        }
        Ok(())
    }

    async fn own_nickname(&self) -> Result<String, UpstreamError> {
        self.check()?;
        Ok(self.nickname.clone())
    }
}

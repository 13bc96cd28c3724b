//! Marketplace ports.
//!
//! [`AdSource`] is the only collaborator the selection pipeline needs: it
//! returns one page of ads for a trade direction. [`MerchantDesk`] covers the
//! authenticated account operations (posting ads, releasing orders, order
//! history, repricing own ads).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{AdId, AdRecord, NewAd, OrderRecord, OwnAd, Price, TradeType};
use crate::error::UpstreamError;

/// Source of marketplace advertisements.
#[async_trait]
pub trait AdSource: Send + Sync {
    /// Fetch one page of ads offered to an operator trading in `trade_type`.
    ///
    /// Records the marketplace returns in a malformed shape are dropped by
    /// the implementation; only transport or API failures are errors.
    async fn fetch_ads(
        &self,
        trade_type: TradeType,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<AdRecord>, UpstreamError>;

    /// Marketplace name for logging and debugging.
    fn marketplace_name(&self) -> &'static str;
}

/// Filter for the operator's order history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHistoryQuery {
    pub asset: String,
    pub fiat: String,
    pub trade_type: Option<TradeType>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Authenticated account operations.
#[async_trait]
pub trait MerchantDesk: Send + Sync {
    /// Publish a new ad. Returns the marketplace's response body.
    async fn post_ad(&self, ad: &NewAd) -> Result<Value, UpstreamError>;

    /// Release the asset for an order whose payment has been received.
    async fn release_order(&self, order_number: &str) -> Result<Value, UpstreamError>;

    /// Orders matched within the query window.
    async fn list_orders(&self, query: &OrderHistoryQuery)
        -> Result<Vec<OrderRecord>, UpstreamError>;

    /// All of the operator's ads, whatever their status.
    async fn own_ads(&self) -> Result<Vec<OwnAd>, UpstreamError>;

    /// Change the price of one of the operator's ads.
    async fn update_ad_price(&self, ad_id: &AdId, price: Price) -> Result<(), UpstreamError>;

    /// The operator's own advertiser nickname.
    async fn own_nickname(&self) -> Result<String, UpstreamError>;
}

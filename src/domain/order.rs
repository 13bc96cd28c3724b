//! Merchant-side records: completed orders, the operator's own ads, and new
//! ad requests.

use serde::Serialize;

use super::id::AdId;
use super::money::{Amount, Price};
use super::trade::TradeType;

/// Status the marketplace reports for an ad that is live.
pub const ONLINE_STATUS: &str = "ONLINE";

/// One order from the operator's order history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_number: String,
    pub advertiser_nickname: Option<String>,
    pub asset: Option<String>,
    pub trade_type: Option<TradeType>,
    /// Fiat value of the order. `None` when the marketplace value was missing
    /// or unparsable.
    pub total_price: Option<Amount>,
}

/// One of the operator's own advertisements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnAd {
    pub ad_id: AdId,
    pub asset: String,
    pub fiat: String,
    pub trade_type: TradeType,
    pub price: Price,
    pub status: String,
}

impl OwnAd {
    /// True when the ad is currently live on the marketplace.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case(ONLINE_STATUS)
    }
}

/// A validated request to publish a new advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAd {
    pub asset: String,
    pub fiat: String,
    pub trade_type: TradeType,
    pub price: Price,
    pub quantity: Amount,
    pub min_limit: Option<Amount>,
    pub max_limit: Option<Amount>,
    pub pay_types: Vec<String>,
}

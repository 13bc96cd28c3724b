//! Normalized marketplace advertisement.

use serde::Serialize;

use super::error::DomainError;
use super::id::{AdId, AdvertiserId};
use super::money::{Amount, Price};
use super::trade::TradeType;

/// Nickname reported when the marketplace omits one.
pub const UNKNOWN_NICKNAME: &str = "Unknown";

/// One advertisement from a marketplace search.
///
/// Records are ephemeral: built from a single marketplace response, consumed
/// by selection, then dropped. The price is validated at construction so any
/// `AdRecord` in hand is eligible for ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdRecord {
    ad_id: AdId,
    advertiser_id: AdvertiserId,
    advertiser_nickname: Option<String>,
    price: Price,
    trade_type: TradeType,
    min_amount: Option<Amount>,
    max_amount: Option<Amount>,
    available: Option<Amount>,
    completion_rate: Option<Amount>,
    order_count: Option<u64>,
}

impl AdRecord {
    /// Create an ad record, validating identifiers and price.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyIdentifier`] for blank identifiers and
    /// [`DomainError::NonPositivePrice`] when `price <= 0`.
    pub fn try_new(
        ad_id: impl Into<AdId>,
        advertiser_id: impl Into<AdvertiserId>,
        price: Price,
        trade_type: TradeType,
    ) -> Result<Self, DomainError> {
        let ad_id = ad_id.into();
        let advertiser_id = advertiser_id.into();

        if ad_id.as_str().trim().is_empty() {
            return Err(DomainError::EmptyIdentifier { field: "ad_id" });
        }
        if advertiser_id.as_str().trim().is_empty() {
            return Err(DomainError::EmptyIdentifier {
                field: "advertiser_id",
            });
        }
        if price <= Price::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }

        Ok(Self {
            ad_id,
            advertiser_id,
            advertiser_nickname: None,
            price,
            trade_type,
            min_amount: None,
            max_amount: None,
            available: None,
            completion_rate: None,
            order_count: None,
        })
    }

    /// Attach the advertiser's display name. Blank names are ignored.
    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        let nickname = nickname.into();
        self.advertiser_nickname = (!nickname.trim().is_empty()).then_some(nickname);
        self
    }

    /// Attach single-transaction limits.
    #[must_use]
    pub fn with_limits(mut self, min_amount: Option<Amount>, max_amount: Option<Amount>) -> Self {
        self.min_amount = min_amount;
        self.max_amount = max_amount;
        self
    }

    /// Attach the remaining tradable quantity.
    #[must_use]
    pub fn with_available(mut self, available: Option<Amount>) -> Self {
        self.available = available;
        self
    }

    /// Attach reputation signals. `completion_rate` is a percentage.
    #[must_use]
    pub fn with_reputation(
        mut self,
        completion_rate: Option<Amount>,
        order_count: Option<u64>,
    ) -> Self {
        self.completion_rate = completion_rate;
        self.order_count = order_count;
        self
    }

    #[must_use]
    pub const fn ad_id(&self) -> &AdId {
        &self.ad_id
    }

    #[must_use]
    pub const fn advertiser_id(&self) -> &AdvertiserId {
        &self.advertiser_id
    }

    #[must_use]
    pub fn advertiser_nickname(&self) -> Option<&str> {
        self.advertiser_nickname.as_deref()
    }

    /// Nickname for display, falling back to [`UNKNOWN_NICKNAME`].
    #[must_use]
    pub fn display_nickname(&self) -> &str {
        self.advertiser_nickname().unwrap_or(UNKNOWN_NICKNAME)
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Side of the advertiser who posted the ad.
    #[must_use]
    pub const fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    #[must_use]
    pub const fn min_amount(&self) -> Option<Amount> {
        self.min_amount
    }

    #[must_use]
    pub const fn max_amount(&self) -> Option<Amount> {
        self.max_amount
    }

    #[must_use]
    pub const fn available(&self) -> Option<Amount> {
        self.available
    }

    /// Completion rate over the last 30 days, in percent.
    #[must_use]
    pub const fn completion_rate(&self) -> Option<Amount> {
        self.completion_rate
    }

    /// Completed orders over the last 30 days.
    #[must_use]
    pub const fn order_count(&self) -> Option<u64> {
        self.order_count
    }
}

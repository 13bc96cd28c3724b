//! Top-price lookup for one or both trade directions.

use std::sync::Arc;

use tracing::{info, instrument};

use super::selector::PriceSelector;
use crate::domain::{SelectionResult, TopPrices, TradeType};
use crate::error::UpstreamError;
use crate::port::AdSource;

/// Fetches one page per direction and selects the best ad from it.
pub struct TopPriceService {
    source: Arc<dyn AdSource>,
    selector: Arc<PriceSelector>,
    page_size: u32,
}

impl TopPriceService {
    #[must_use]
    pub fn new(source: Arc<dyn AdSource>, selector: Arc<PriceSelector>, page_size: u32) -> Self {
        Self {
            source,
            selector,
            page_size,
        }
    }

    #[must_use]
    pub fn selector(&self) -> &Arc<PriceSelector> {
        &self.selector
    }

    /// Best ad for each requested direction, or both when `requested` is
    /// `None`. The result holds exactly the requested keys; a key maps to
    /// `None` when nothing was eligible.
    ///
    /// # Errors
    ///
    /// Any fetch failure fails the whole call; partial results are never
    /// returned.
    pub async fn get_top_prices(
        &self,
        requested: Option<TradeType>,
    ) -> Result<TopPrices, UpstreamError> {
        let mut prices = TopPrices::new();
        match requested {
            Some(trade_type) => {
                prices.insert(trade_type, self.top_price(trade_type).await?);
            }
            None => {
                let (buy, sell) = tokio::try_join!(
                    self.top_price(TradeType::Buy),
                    self.top_price(TradeType::Sell)
                )?;
                prices.insert(TradeType::Buy, buy);
                prices.insert(TradeType::Sell, sell);
            }
        }
        Ok(prices)
    }

    /// Best ad for one direction.
    #[instrument(skip(self), fields(marketplace = self.source.marketplace_name()))]
    pub async fn top_price(&self, trade_type: TradeType) -> Result<SelectionResult, UpstreamError> {
        let batch = self.source.fetch_ads(trade_type, 1, self.page_size).await?;
        let best = self.selector.select_best(&batch, trade_type);
        match &best {
            Some(ad) => info!(
                trade_type = %trade_type,
                price = %ad.price,
                advertiser = %ad.nickname,
                "Top price selected"
            ),
            None => info!(trade_type = %trade_type, fetched = batch.len(), "No eligible ads"),
        }
        Ok(best)
    }
}

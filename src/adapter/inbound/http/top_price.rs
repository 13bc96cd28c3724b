//! `GET /api/top-price`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::error::ApiError;
use super::ApiState;
use crate::domain::{TopPrices, TradeType};

#[derive(Debug, Default, Deserialize)]
pub struct TopPriceQuery {
    /// `BUY`, `SELL`, or absent for both.
    #[serde(default)]
    pub ad_type: Option<String>,
}

impl TopPriceQuery {
    /// Requested direction. An empty value means both.
    pub fn direction(&self) -> Result<Option<TradeType>, ApiError> {
        match self.ad_type.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                ApiError::BadRequest(format!(
                    "Invalid ad_type '{raw}'. Valid options are BUY or SELL."
                ))
            }),
        }
    }
}

pub async fn top_price(
    State(state): State<ApiState>,
    query: Result<Query<TopPriceQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let prices = state.top_prices.get_top_prices(query.direction()?).await?;
    Ok(Json(render(&prices)))
}

/// `{"buy": {"price", "nickname"}, "sell": {}}`; an empty object means
/// nothing was eligible in that direction.
#[must_use]
pub fn render(prices: &TopPrices) -> Value {
    let mut body = Map::new();
    for (side, result) in prices.iter() {
        let entry = match result {
            Some(best) => json!({
                "price": best.price.to_string(),
                "nickname": best.nickname,
            }),
            None => json!({}),
        };
        body.insert(side.key().to_string(), entry);
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BestAd;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_ad_type_means_both() {
        let query = TopPriceQuery {
            ad_type: Some("  ".into()),
        };
        assert_eq!(query.direction().unwrap(), None);
    }

    #[test]
    fn unknown_ad_type_is_rejected() {
        let query = TopPriceQuery {
            ad_type: Some("HOLD".into()),
        };
        assert!(matches!(query.direction(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn renders_only_requested_directions() {
        let mut prices = TopPrices::new();
        prices.insert(
            TradeType::Sell,
            Some(BestAd {
                price: dec!(2960.50),
                nickname: "Alice".into(),
                ad_id: "ad-1".into(),
                advertiser_id: "adv-1".into(),
            }),
        );

        let body = render(&prices);
        assert_eq!(body, json!({"sell": {"price": "2960.50", "nickname": "Alice"}}));
    }

    #[test]
    fn empty_result_renders_as_empty_object() {
        let mut prices = TopPrices::new();
        prices.insert(TradeType::Buy, None);
        assert_eq!(render(&prices), json!({"buy": {}}));
    }
}

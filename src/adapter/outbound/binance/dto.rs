//! Binance C2C wire types and their conversion into domain records.
//!
//! Numeric fields arrive as JSON strings or numbers depending on the
//! endpoint, so they are kept as raw [`Value`]s and parsed leniently.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AdId, AdRecord, DomainError, OrderRecord, OwnAd, TradeType};

const UNKNOWN_AD: &str = "<unknown>";

/// Common response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl<T> Envelope<T> {
    /// Failure message when the envelope reports an unsuccessful call.
    #[must_use]
    pub fn failure(&self) -> Option<String> {
        if self.success != Some(false) {
            return None;
        }
        Some(
            self.msg
                .clone()
                .or_else(|| self.message.clone())
                .unwrap_or_else(|| match &self.code {
                    Some(code) => format!("request failed with code {code}"),
                    None => "request failed".into(),
                }),
        )
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.msg.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

/// One entry of `/sapi/v1/c2c/ads/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdSearchItem {
    #[serde(default)]
    pub adv: Option<AdvDto>,
    #[serde(default)]
    pub advertiser: Option<AdvertiserDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvDto {
    #[serde(default)]
    pub adv_no: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub min_single_trans_amount: Option<Value>,
    #[serde(default)]
    pub max_single_trans_amount: Option<Value>,
    #[serde(default)]
    pub surplus_amount: Option<Value>,
    #[serde(default)]
    pub advertiser: Option<AdvertiserDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserDto {
    #[serde(default)]
    pub user_no: Option<Value>,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub month_order_count: Option<Value>,
    /// Completion ratio in `[0, 1]`.
    #[serde(default)]
    pub month_finish_rate: Option<Value>,
}

impl AdSearchItem {
    /// Convert into a domain record.
    ///
    /// `side_hint` is used when the ad does not state its own side.
    pub fn into_record(self, side_hint: TradeType) -> Result<AdRecord, DomainError> {
        let adv = self
            .adv
            .ok_or_else(|| malformed(UNKNOWN_AD, "missing adv object"))?;
        let ad_id =
            text(adv.adv_no.as_ref()).ok_or_else(|| malformed(UNKNOWN_AD, "missing advNo"))?;

        // The advertiser block sits beside `adv` in search results but
        // inside it in some responses.
        let advertiser = self
            .advertiser
            .or(adv.advertiser)
            .ok_or_else(|| malformed(&ad_id, "missing advertiser"))?;
        let advertiser_id = text(advertiser.user_no.as_ref())
            .ok_or_else(|| malformed(&ad_id, "missing advertiser userNo"))?;

        let price = decimal(adv.price.as_ref())
            .ok_or_else(|| malformed(&ad_id, "missing or unparsable price"))?;
        let trade_type = match adv.trade_type.as_deref() {
            Some(raw) => TradeType::from_str(raw)?,
            None => side_hint,
        };

        let completion_rate = decimal(advertiser.month_finish_rate.as_ref())
            .and_then(|rate| rate.checked_mul(Decimal::ONE_HUNDRED));
        let order_count = decimal(advertiser.month_order_count.as_ref())
            .and_then(|count| u64::try_from(count.trunc()).ok());

        let mut record = AdRecord::try_new(ad_id, advertiser_id, price, trade_type)?
            .with_limits(
                decimal(adv.min_single_trans_amount.as_ref()),
                decimal(adv.max_single_trans_amount.as_ref()),
            )
            .with_available(decimal(adv.surplus_amount.as_ref()))
            .with_reputation(completion_rate, order_count);
        if let Some(nickname) = advertiser.nick_name {
            record = record.with_nickname(nickname);
        }
        Ok(record)
    }
}

/// One entry of `/sapi/v1/c2c/orderMatch/listOrders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(default)]
    pub order_number: Option<Value>,
    #[serde(default, alias = "counterPartNickName")]
    pub advertiser_nickname: Option<String>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub total_price: Option<Value>,
}

impl From<OrderDto> for OrderRecord {
    fn from(dto: OrderDto) -> Self {
        Self {
            order_number: text(dto.order_number.as_ref()).unwrap_or_default(),
            advertiser_nickname: dto.advertiser_nickname,
            asset: dto.asset,
            trade_type: dto.trade_type.and_then(|t| t.parse().ok()),
            total_price: decimal(dto.total_price.as_ref()),
        }
    }
}

/// One entry of `/sapi/v1/c2c/ads/list-user-ads`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnAdDto {
    #[serde(default, alias = "advNo")]
    pub adv_id: Option<Value>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub fiat: Option<String>,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
}

impl TryFrom<OwnAdDto> for OwnAd {
    type Error = DomainError;

    fn try_from(dto: OwnAdDto) -> Result<Self, Self::Error> {
        let ad_id =
            text(dto.adv_id.as_ref()).ok_or_else(|| malformed(UNKNOWN_AD, "missing advId"))?;
        let trade_type = dto
            .trade_type
            .as_deref()
            .ok_or_else(|| malformed(&ad_id, "missing tradeType"))?
            .parse()?;
        let price = decimal(dto.price.as_ref())
            .ok_or_else(|| malformed(&ad_id, "missing or unparsable price"))?;
        Ok(Self {
            ad_id: AdId::new(ad_id),
            asset: dto.asset.unwrap_or_default(),
            fiat: dto.fiat.unwrap_or_default(),
            trade_type,
            price,
            status: text(dto.status.as_ref()).unwrap_or_default(),
        })
    }
}

/// `/sapi/v1/c2c/user-info` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoDto {
    #[serde(default)]
    pub nick_name: Option<String>,
}

fn malformed(ad_id: &str, reason: &str) -> DomainError {
    DomainError::MalformedAd {
        ad_id: ad_id.to_string(),
        reason: reason.to_string(),
    }
}

/// Non-empty text from a string or number.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decimal from a string or number.
fn decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn item(value: Value) -> AdSearchItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_search_result() {
        let record = item(json!({
            "adv": {
                "advNo": "11520384",
                "price": "2950.50",
                "tradeType": "SELL",
                "minSingleTransAmount": "10000",
                "maxSingleTransAmount": "2000000",
                "surplusAmount": "812.4"
            },
            "advertiser": {
                "userNo": "s8f2a",
                "nickName": "Alice",
                "monthOrderCount": 431,
                "monthFinishRate": 0.983
            }
        }))
        .into_record(TradeType::Sell)
        .unwrap();

        assert_eq!(record.ad_id().as_str(), "11520384");
        assert_eq!(record.advertiser_id().as_str(), "s8f2a");
        assert_eq!(record.price(), dec!(2950.50));
        assert_eq!(record.display_nickname(), "Alice");
        assert_eq!(record.completion_rate(), Some(dec!(98.3)));
        assert_eq!(record.order_count(), Some(431));
        assert_eq!(record.available(), Some(dec!(812.4)));
    }

    #[test]
    fn advertiser_may_be_nested_in_adv() {
        let record = item(json!({
            "adv": {
                "advNo": 7,
                "price": 2960,
                "advertiser": {"userNo": "u-1", "nickName": "Bob"}
            }
        }))
        .into_record(TradeType::Buy)
        .unwrap();

        assert_eq!(record.ad_id().as_str(), "7");
        assert_eq!(record.display_nickname(), "Bob");
        assert_eq!(record.trade_type(), TradeType::Buy);
    }

    #[test]
    fn rejects_bad_price() {
        for price in [json!("abc"), json!("0"), json!(null)] {
            let result = item(json!({
                "adv": {"advNo": "1", "price": price},
                "advertiser": {"userNo": "u"}
            }))
            .into_record(TradeType::Sell);
            assert!(result.is_err(), "price {price:?} should be rejected");
        }
    }

    #[test]
    fn envelope_reports_failure() {
        let envelope: Envelope<Value> =
            serde_json::from_value(json!({"code": "-9000", "success": false, "message": "nope"}))
                .unwrap();
        assert_eq!(envelope.failure().as_deref(), Some("nope"));

        let ok: Envelope<Value> =
            serde_json::from_value(json!({"data": [], "success": true})).unwrap();
        assert!(ok.failure().is_none());
    }

    #[test]
    fn decodes_order_and_own_ad() {
        let order: OrderDto = serde_json::from_value(json!({
            "orderNumber": "2201",
            "advertiserNickname": "Carol",
            "asset": "USDT",
            "tradeType": "BUY",
            "totalPrice": "150000.00"
        }))
        .unwrap();
        let order = OrderRecord::from(order);
        assert_eq!(order.total_price, Some(dec!(150000.00)));
        assert_eq!(order.trade_type, Some(TradeType::Buy));

        let own: OwnAdDto = serde_json::from_value(json!({
            "advNo": "99",
            "asset": "USDT",
            "fiat": "TZS",
            "tradeType": "SELL",
            "price": "2990",
            "status": "ONLINE"
        }))
        .unwrap();
        let own = OwnAd::try_from(own).unwrap();
        assert!(own.is_online());
        assert_eq!(own.ad_id.as_str(), "99");
    }
}

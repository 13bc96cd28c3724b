//! Posting ads and releasing orders on the merchant account.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::domain::{Amount, NewAd, Price, TradeType};
use crate::error::{Result, ValidationError};
use crate::port::MerchantDesk;

/// Ad posting request as supplied by the operator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostAdRequest {
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub quantity: Option<Amount>,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub fiat: Option<String>,
    #[serde(default)]
    pub pay_types: Option<Vec<String>>,
    #[serde(default)]
    pub min_limit: Option<Amount>,
    #[serde(default)]
    pub max_limit: Option<Amount>,
}

/// Validates operator requests and forwards them to the merchant account.
pub struct OrderDesk {
    desk: Arc<dyn MerchantDesk>,
    default_asset: String,
    default_fiat: String,
    allowed_pay_types: Vec<String>,
}

impl OrderDesk {
    #[must_use]
    pub fn new(
        desk: Arc<dyn MerchantDesk>,
        default_asset: impl Into<String>,
        default_fiat: impl Into<String>,
        allowed_pay_types: Vec<String>,
    ) -> Self {
        Self {
            desk,
            default_asset: default_asset.into(),
            default_fiat: default_fiat.into(),
            allowed_pay_types,
        }
    }

    #[must_use]
    pub fn allowed_pay_types(&self) -> &[String] {
        &self.allowed_pay_types
    }

    /// Turn a request into a [`NewAd`], filling defaults.
    pub fn prepare_ad(
        &self,
        request: &PostAdRequest,
    ) -> std::result::Result<NewAd, ValidationError> {
        let price = require_positive("price", request.price)?;
        let quantity = require_positive("quantity", request.quantity)?;
        let trade_type: TradeType = request
            .trade_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ValidationError::MissingField("trade_type"))?
            .parse()
            .map_err(|e: crate::domain::DomainError| ValidationError::InvalidValue {
                field: "trade_type",
                reason: e.to_string(),
            })?;

        let pay_types = match &request.pay_types {
            Some(requested) if !requested.is_empty() => {
                let mut accepted = Vec::with_capacity(requested.len());
                for pay_type in requested {
                    let allowed = self
                        .allowed_pay_types
                        .iter()
                        .find(|a| a.eq_ignore_ascii_case(pay_type.trim()))
                        .ok_or_else(|| ValidationError::InvalidValue {
                            field: "pay_types",
                            reason: format!(
                                "'{pay_type}' is not one of: {}",
                                self.allowed_pay_types.join(", ")
                            ),
                        })?;
                    if !accepted.contains(allowed) {
                        accepted.push(allowed.clone());
                    }
                }
                accepted
            }
            _ => self.allowed_pay_types.clone(),
        };

        for (field, value) in [("min_limit", request.min_limit), ("max_limit", request.max_limit)] {
            if value.is_some_and(|v| v <= Decimal::ZERO) {
                return Err(ValidationError::InvalidValue {
                    field,
                    reason: "must be positive".into(),
                });
            }
        }
        if let (Some(min), Some(max)) = (request.min_limit, request.max_limit) {
            if min > max {
                return Err(ValidationError::InvalidValue {
                    field: "min_limit",
                    reason: format!("{min} exceeds max_limit {max}"),
                });
            }
        }

        let asset = non_blank(request.asset.as_deref()).unwrap_or(self.default_asset.as_str());
        let fiat = non_blank(request.fiat.as_deref()).unwrap_or(self.default_fiat.as_str());

        Ok(NewAd {
            asset: asset.to_uppercase(),
            fiat: fiat.to_uppercase(),
            trade_type,
            price,
            quantity,
            min_limit: request.min_limit,
            max_limit: request.max_limit,
            pay_types,
        })
    }

    /// Validate and publish an ad.
    pub async fn post_ad(&self, request: &PostAdRequest) -> Result<Value> {
        let ad = self.prepare_ad(request)?;
        let response = self.desk.post_ad(&ad).await?;
        info!(
            trade_type = %ad.trade_type,
            asset = %ad.asset,
            fiat = %ad.fiat,
            price = %ad.price,
            quantity = %ad.quantity,
            "Ad posted"
        );
        Ok(response)
    }

    /// Release the asset for a paid order.
    pub async fn release_order(&self, order_number: Option<&str>) -> Result<Value> {
        let order_number =
            non_blank(order_number).ok_or(ValidationError::MissingField("order_number"))?;
        let response = self.desk.release_order(order_number).await?;
        info!(order_number, "Order released");
        Ok(response)
    }
}

fn require_positive(
    field: &'static str,
    value: Option<Decimal>,
) -> std::result::Result<Decimal, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidValue {
            field,
            reason: "must be positive".into(),
        });
    }
    Ok(value)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

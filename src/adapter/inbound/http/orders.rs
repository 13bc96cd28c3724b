//! Ad posting and order release.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;
use super::ApiState;
use crate::application::PostAdRequest;

pub async fn post_ad(
    State(state): State<ApiState>,
    body: Result<Json<PostAdRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body?;
    let response = state.orders.post_ad(&request).await?;
    Ok(Json(response))
}

#[derive(Debug, Default, Deserialize)]
pub struct ReleaseOrderBody {
    /// Order numbers are long integers; accept them as strings or numbers.
    #[serde(default)]
    pub order_number: Option<Value>,
}

impl ReleaseOrderBody {
    fn order_number(&self) -> Option<String> {
        match self.order_number.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

pub async fn release_order(
    State(state): State<ApiState>,
    body: Result<Json<ReleaseOrderBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let order_number = body.order_number();
    let response = state.orders.release_order(order_number.as_deref()).await?;
    Ok(Json(response))
}

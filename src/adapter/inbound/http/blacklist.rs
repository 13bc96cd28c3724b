//! Blacklist management.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::ApiState;
use crate::application::BlacklistKind;
use crate::error::ValidationError;

pub async fn list(State(state): State<ApiState>) -> Json<Value> {
    let snapshot = state.blacklist.snapshot();
    Json(json!({
        "restricted_advertisers": snapshot.advertisers(),
        "blacklisted_ads": snapshot.ads(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct AdvertiserBody {
    #[serde(default)]
    pub advertiser_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdBody {
    #[serde(default)]
    pub ad_id: Option<String>,
}

pub async fn ban_advertiser(
    State(state): State<ApiState>,
    body: Result<Json<AdvertiserBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    change(&state, BlacklistKind::Advertiser, body.advertiser_id, true)
}

pub async fn unban_advertiser(
    State(state): State<ApiState>,
    body: Result<Json<AdvertiserBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    change(&state, BlacklistKind::Advertiser, body.advertiser_id, false)
}

pub async fn ban_ad(
    State(state): State<ApiState>,
    body: Result<Json<AdBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    change(&state, BlacklistKind::Ad, body.ad_id, true)
}

pub async fn unban_ad(
    State(state): State<ApiState>,
    body: Result<Json<AdBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    change(&state, BlacklistKind::Ad, body.ad_id, false)
}

fn change(
    state: &ApiState,
    kind: BlacklistKind,
    identifier: Option<String>,
    add: bool,
) -> Result<Json<Value>, ApiError> {
    let field = match kind {
        BlacklistKind::Advertiser => "advertiser_id",
        BlacklistKind::Ad => "ad_id",
    };
    let identifier = identifier
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingField(field))?;

    let changed = if add {
        state.blacklist.add(kind, &identifier)
    } else {
        state.blacklist.remove(kind, &identifier)
    };

    let label = match kind {
        BlacklistKind::Advertiser => "Advertiser",
        BlacklistKind::Ad => "Ad",
    };
    let message = match (add, changed) {
        (true, true) => format!("{label} {identifier} added to blacklist"),
        (true, false) => format!("{label} {identifier} is already blacklisted"),
        (false, true) => format!("{label} {identifier} removed from blacklist"),
        (false, false) => format!("{label} {identifier} was not blacklisted"),
    };

    let snapshot = state.blacklist.snapshot();
    let (count_key, count) = match kind {
        BlacklistKind::Advertiser => ("restricted_count", snapshot.advertiser_count()),
        BlacklistKind::Ad => ("blacklisted_count", snapshot.ad_count()),
    };

    let mut body = json!({
        "success": true,
        "message": message,
        "changed": changed,
    });
    body[count_key] = json!(count);
    Ok(Json(body))
}

//! Runtime-adjustable ad criteria.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::error::ApiError;
use super::ApiState;
use crate::application::CriteriaUpdate;

pub async fn get_limits(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({ "filters": state.criteria.current() }))
}

/// Merge the given fields into the current criteria. Omitted fields keep
/// their value; an invalid combination leaves the criteria untouched.
pub async fn set_limits(
    State(state): State<ApiState>,
    body: Result<Json<CriteriaUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(update) = body?;
    let filters = state.criteria.update(&update)?;
    Ok(Json(json!({
        "success": true,
        "filters": filters,
    })))
}

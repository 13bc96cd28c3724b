//! `GET /api/leaderboard`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::ApiState;
use crate::application::leaderboard::{LeaderboardRequest, LeaderboardSort};
use crate::domain::TradeType;

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub fiat: Option<String>,
    #[serde(default)]
    pub trade_type: Option<String>,
}

impl LeaderboardQuery {
    pub fn into_request(self) -> Result<LeaderboardRequest, ApiError> {
        let defaults = LeaderboardRequest::default();
        let sort_by = match non_blank(self.sort_by) {
            Some(raw) => raw.parse::<LeaderboardSort>()?,
            None => defaults.sort_by,
        };
        let trade_type = match non_blank(self.trade_type) {
            Some(raw) => Some(raw.parse::<TradeType>().map_err(|_| {
                ApiError::BadRequest(format!(
                    "Invalid trade_type '{raw}'. Valid options are BUY or SELL."
                ))
            })?),
            None => None,
        };

        let request = LeaderboardRequest {
            sort_by,
            days: self.days.unwrap_or(defaults.days),
            asset: non_blank(self.asset).map(|a| a.to_ascii_uppercase()),
            fiat: non_blank(self.fiat).map(|f| f.to_ascii_uppercase()),
            trade_type,
        };
        request.validate()?;
        Ok(request)
    }
}

pub async fn leaderboard(
    State(state): State<ApiState>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let request = query.into_request()?;
    let board = state.leaderboard.leaderboard(&request).await?;

    Ok(Json(json!({
        "sort_by": board.sort_by,
        "days": board.days,
        "count": board.traders.len(),
        "total_orders": board.total_orders,
        "traders": board.traders,
    })))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_volume_over_thirty_days() {
        let request = LeaderboardQuery::default().into_request().unwrap();
        assert_eq!(request.sort_by, LeaderboardSort::Volume);
        assert_eq!(request.days, 30);
    }

    #[test]
    fn rejects_unknown_sort_key() {
        let query = LeaderboardQuery {
            sort_by: Some("profit".into()),
            ..Default::default()
        };
        assert!(matches!(query.into_request(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn rejects_zero_day_window() {
        let query = LeaderboardQuery {
            days: Some(0),
            ..Default::default()
        };
        assert!(query.into_request().is_err());
    }
}

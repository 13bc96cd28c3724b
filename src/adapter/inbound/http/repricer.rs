//! Repricer control.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::ApiState;
use crate::application::repricer::StartOutcome;

pub async fn status(State(state): State<ApiState>) -> Json<Value> {
    let status = state.repricer.status();
    Json(json!({
        "status": if status.running { "running" } else { "stopped" },
        "interval": status.interval_secs,
        "cycles": status.cycles,
        "ads_updated": status.ads_updated,
        "last_run": status.last_run,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct StartBody {
    /// Seconds between cycles.
    #[serde(default)]
    pub interval: Option<u64>,
}

impl StartBody {
    /// An empty body means no overrides. Anything else must be valid JSON.
    fn parse(raw: &[u8]) -> Result<Self, ApiError> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let Json(body) = Json::<Self>::from_bytes(raw)?;
        Ok(body)
    }
}

/// The body is optional; without one the configured interval is used.
pub async fn start(State(state): State<ApiState>, raw: Bytes) -> Result<Json<Value>, ApiError> {
    let interval = StartBody::parse(&raw)?.interval.map(Duration::from_secs);
    let outcome = state.repricer.start(interval)?;
    let interval_secs = state.repricer.status().interval_secs;

    let message = match outcome {
        StartOutcome::Started => "Price updater started",
        StartOutcome::AlreadyRunning => "Price updater is already running",
    };
    Ok(Json(json!({
        "success": true,
        "message": message,
        "interval": interval_secs,
    })))
}

pub async fn stop(State(state): State<ApiState>) -> Json<Value> {
    let message = if state.repricer.stop() {
        "Price updater stopped"
    } else {
        "Price updater is not running"
    };
    Json(json!({
        "success": true,
        "message": message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_uses_configured_interval() {
        assert!(StartBody::parse(b"").unwrap().interval.is_none());
        assert!(StartBody::parse(b"  \n").unwrap().interval.is_none());
    }

    #[test]
    fn interval_is_read_from_json() {
        assert_eq!(StartBody::parse(br#"{"interval": 45}"#).unwrap().interval, Some(45));
    }

    #[test]
    fn malformed_interval_is_rejected() {
        assert!(matches!(
            StartBody::parse(br#"{"interval": "abc"}"#),
            Err(ApiError::BadRequest(_))
        ));
    }
}

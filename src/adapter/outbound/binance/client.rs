//! Binance C2C SAPI client.
//!
//! Every call is signed: the query string (with `recvWindow` and a fresh
//! `timestamp`) is passed to the [`RequestSigner`] and the resulting
//! signature appended. Ad search sends its filters as a JSON body; the other
//! endpoints carry everything in the query.
//!
//! Read-only calls are retried on connect errors and timeouts. Calls that
//! change account state are sent once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client as HttpClient, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::dto::{AdSearchItem, Envelope, ErrorBody, OrderDto, OwnAdDto, UserInfoDto};
use super::settings::{BinanceConfig, MAX_PAGE_SIZE};
use crate::domain::money::round_price;
use crate::domain::{AdId, AdRecord, NewAd, OrderRecord, OwnAd, Price, TradeType};
use crate::error::UpstreamError;
use crate::port::{AdSource, MerchantDesk, OrderHistoryQuery, RequestSigner};

const SEARCH_ADS: &str = "/sapi/v1/c2c/ads/search";
const POST_AD: &str = "/sapi/v1/c2c/ads/post";
const UPDATE_AD: &str = "/sapi/v1/c2c/ads/update";
const LIST_USER_ADS: &str = "/sapi/v1/c2c/ads/list-user-ads";
const RELEASE_COIN: &str = "/sapi/v1/c2c/orderMatch/releaseCoin";
const LIST_ORDERS: &str = "/sapi/v1/c2c/orderMatch/listOrders";
const USER_INFO: &str = "/sapi/v1/c2c/user-info";

const ORDER_PAGE_SIZE: u32 = 100;
const MAX_ORDER_PAGES: u32 = 20;

const RESTRICTED_LOCATION: &str = "restricted location";

/// Whether a request may be repeated after a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retry {
    Allowed,
    Never,
}

/// HTTP client for the Binance C2C SAPI.
pub struct BinanceC2cClient {
    http: HttpClient,
    base_url: String,
    asset: String,
    fiat: String,
    pay_types: Vec<String>,
    recv_window_ms: u64,
    signer: Arc<dyn RequestSigner>,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl BinanceC2cClient {
    #[must_use]
    pub fn from_config(config: &BinanceConfig, signer: Arc<dyn RequestSigner>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            asset: config.asset.clone(),
            fiat: config.fiat.clone(),
            pay_types: config.pay_types.clone(),
            recv_window_ms: config.recv_window_ms,
            signer,
            retry_max_attempts: config.http.retry_max_attempts,
            retry_backoff_ms: config.http.retry_backoff_ms,
        }
    }

    fn signed_url(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<String, UpstreamError> {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            query.append_pair(key, value);
        }
        query.append_pair("recvWindow", &self.recv_window_ms.to_string());
        query.append_pair("timestamp", &Utc::now().timestamp_millis().to_string());
        let query = query.finish();

        let signature = self.signer.sign(&query)?;
        Ok(format!("{}{endpoint}?{query}&signature={signature}", self.base_url))
    }

    async fn call<T>(
        &self,
        method: Method,
        endpoint: &'static str,
        params: &[(&str, String)],
        body: Option<&Value>,
        retry: Retry,
    ) -> Result<Envelope<T>, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let max_attempts = match retry {
            Retry::Allowed => self.retry_max_attempts.max(1),
            Retry::Never => 1,
        };
        let mut attempt = 0;

        loop {
            attempt += 1;
            // Re-signed per attempt so the timestamp stays inside recvWindow.
            let url = self.signed_url(endpoint, params)?;
            let mut request = self
                .http
                .request(method.clone(), &url)
                .header("X-MBX-APIKEY", self.signer.api_key())
                .header("clientType", "web");
            if let Some(body) = body {
                request = request.json(body);
            }

            debug!(endpoint, attempt, "Sending marketplace request");
            match request.send().await {
                Ok(response) => return Self::decode(endpoint, response).await,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(transport(endpoint, &err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    async fn decode<T>(endpoint: &str, response: Response) -> Result<Envelope<T>, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| transport(endpoint, &err))?;

        if !status.is_success() {
            return Err(status_error(endpoint, status.as_u16(), &body));
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|err| UpstreamError::Decode {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            })?;
        if let Some(message) = envelope.failure() {
            return Err(api_error(endpoint, status.as_u16(), message));
        }
        Ok(envelope)
    }

    /// Search one page of ads for an operator trading in `trade_type`.
    pub async fn search_ads(
        &self,
        trade_type: TradeType,
        page: u32,
        rows: u32,
    ) -> Result<Vec<AdRecord>, UpstreamError> {
        let rows = rows.clamp(1, MAX_PAGE_SIZE);
        let body = json!({
            "asset": self.asset,
            "fiat": self.fiat,
            "tradeType": trade_type.as_str(),
            "page": page.max(1),
            "rows": rows,
            "payTypes": self.pay_types,
            "publisherType": Value::Null,
        });

        let envelope: Envelope<Vec<Value>> = self
            .call(Method::POST, SEARCH_ADS, &[], Some(&body), Retry::Allowed)
            .await?;
        let raw = envelope.data.unwrap_or_default();

        // Ads in the result are on the other side of the book.
        let side = trade_type.counterparty();
        let mut ads = Vec::with_capacity(raw.len());
        for value in raw {
            let record = serde_json::from_value::<AdSearchItem>(value)
                .map_err(|err| err.to_string())
                .and_then(|item| item.into_record(side).map_err(|err| err.to_string()));
            match record {
                Ok(ad) => ads.push(ad),
                Err(reason) => warn!(endpoint = SEARCH_ADS, %reason, "Dropping malformed ad"),
            }
        }

        debug!(trade_type = %trade_type, count = ads.len(), "Fetched ads");
        Ok(ads)
    }
}

#[async_trait]
impl AdSource for BinanceC2cClient {
    async fn fetch_ads(
        &self,
        trade_type: TradeType,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<AdRecord>, UpstreamError> {
        self.search_ads(trade_type, page, page_size).await
    }

    fn marketplace_name(&self) -> &'static str {
        "Binance C2C"
    }
}

#[async_trait]
impl MerchantDesk for BinanceC2cClient {
    async fn post_ad(&self, ad: &NewAd) -> Result<Value, UpstreamError> {
        let mut params = vec![
            ("asset", ad.asset.clone()),
            ("fiat", ad.fiat.clone()),
            ("tradeType", ad.trade_type.as_str().to_string()),
            ("price", ad.price.to_string()),
            ("quantity", ad.quantity.to_string()),
            ("payTypes", ad.pay_types.join(",")),
        ];
        if let Some(min) = ad.min_limit {
            params.push(("minSingleTransAmount", min.to_string()));
        }
        if let Some(max) = ad.max_limit {
            params.push(("maxSingleTransAmount", max.to_string()));
        }

        let envelope: Envelope<Value> = self
            .call(Method::POST, POST_AD, &params, None, Retry::Never)
            .await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }

    async fn release_order(&self, order_number: &str) -> Result<Value, UpstreamError> {
        let params = [("orderNumber", order_number.to_string())];
        let envelope: Envelope<Value> = self
            .call(Method::POST, RELEASE_COIN, &params, None, Retry::Never)
            .await?;
        info!(order_number, "Release confirmed by marketplace");
        Ok(envelope.data.unwrap_or(Value::Null))
    }

    async fn list_orders(
        &self,
        query: &OrderHistoryQuery,
    ) -> Result<Vec<OrderRecord>, UpstreamError> {
        let mut orders = Vec::new();

        for page in 1..=MAX_ORDER_PAGES {
            let mut params = vec![
                ("asset", query.asset.clone()),
                ("fiat", query.fiat.clone()),
                ("startTimestamp", query.start.timestamp_millis().to_string()),
                ("endTimestamp", query.end.timestamp_millis().to_string()),
                ("page", page.to_string()),
                ("rows", ORDER_PAGE_SIZE.to_string()),
            ];
            if let Some(trade_type) = query.trade_type {
                params.push(("tradeType", trade_type.as_str().to_string()));
            }

            let envelope: Envelope<Vec<OrderDto>> = self
                .call(Method::GET, LIST_ORDERS, &params, None, Retry::Allowed)
                .await?;
            let batch = envelope.data.unwrap_or_default();
            let fetched = batch.len();
            orders.extend(batch.into_iter().map(OrderRecord::from));

            if fetched < ORDER_PAGE_SIZE as usize {
                break;
            }
            if page == MAX_ORDER_PAGES {
                warn!(pages = MAX_ORDER_PAGES, "Order history truncated");
            }
        }

        debug!(count = orders.len(), "Fetched order history");
        Ok(orders)
    }

    async fn own_ads(&self) -> Result<Vec<OwnAd>, UpstreamError> {
        let envelope: Envelope<Vec<OwnAdDto>> = self
            .call(Method::GET, LIST_USER_ADS, &[], None, Retry::Allowed)
            .await?;

        let mut ads = Vec::new();
        for dto in envelope.data.unwrap_or_default() {
            match OwnAd::try_from(dto) {
                Ok(ad) => ads.push(ad),
                Err(err) => {
                    warn!(endpoint = LIST_USER_ADS, error = %err, "Dropping malformed own ad");
                }
            }
        }
        Ok(ads)
    }

    async fn update_ad_price(&self, ad_id: &AdId, price: Price) -> Result<(), UpstreamError> {
        let params = [
            ("advertiseId", ad_id.to_string()),
            ("price", round_price(price).to_string()),
        ];
        let _: Envelope<Value> = self
            .call(Method::POST, UPDATE_AD, &params, None, Retry::Never)
            .await?;
        Ok(())
    }

    async fn own_nickname(&self) -> Result<String, UpstreamError> {
        let envelope: Envelope<UserInfoDto> = self
            .call(Method::GET, USER_INFO, &[], None, Retry::Allowed)
            .await?;
        envelope
            .data
            .and_then(|info| info.nick_name)
            .filter(|nickname| !nickname.trim().is_empty())
            .ok_or_else(|| UpstreamError::Decode {
                endpoint: USER_INFO.to_string(),
                reason: "response carries no nickName".into(),
            })
    }
}

fn transport(endpoint: &str, err: &reqwest::Error) -> UpstreamError {
    UpstreamError::Transport {
        endpoint: endpoint.to_string(),
        reason: err.to_string(),
    }
}

fn api_error(endpoint: &str, status: u16, message: String) -> UpstreamError {
    if message.to_ascii_lowercase().contains(RESTRICTED_LOCATION) {
        return UpstreamError::RestrictedLocation {
            endpoint: endpoint.to_string(),
        };
    }
    UpstreamError::Status {
        endpoint: endpoint.to_string(),
        status,
        message,
    }
}

/// Build the error for a non-2xx response from its body.
fn status_error(endpoint: &str, status: u16, body: &str) -> UpstreamError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| body.trim().to_string());
    let message = if message.is_empty() {
        format!("HTTP {status}")
    } else {
        message
    };
    api_error(endpoint, status, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::binance::signer::HmacSigner;

    fn client() -> BinanceC2cClient {
        let config = BinanceConfig {
            api_url: "https://api.example.test/".into(),
            ..BinanceConfig::default()
        };
        BinanceC2cClient::from_config(&config, Arc::new(HmacSigner::new("key", "secret")))
    }

    #[test]
    fn signed_url_appends_signature_last() {
        let url = client()
            .signed_url(RELEASE_COIN, &[("orderNumber", "42".into())])
            .unwrap();

        assert!(url.starts_with("https://api.example.test/sapi/v1/c2c/orderMatch/releaseCoin?"));
        assert!(url.contains("orderNumber=42&recvWindow=5000&timestamp="));
        let signature = url.rsplit("&signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn signing_without_credentials_fails() {
        let client = BinanceC2cClient::from_config(
            &BinanceConfig::default(),
            Arc::new(HmacSigner::new("", "")),
        );
        assert_eq!(
            client.signed_url(USER_INFO, &[]),
            Err(UpstreamError::MissingCredentials)
        );
    }

    #[test]
    fn restricted_location_is_recognised() {
        let err = status_error(
            SEARCH_ADS,
            451,
            r#"{"code":0,"msg":"Service unavailable from a restricted location according to 'b. Eligibility'"}"#,
        );
        assert!(matches!(err, UpstreamError::RestrictedLocation { .. }));
    }

    #[test]
    fn status_error_prefers_msg_then_body() {
        let err = status_error(
            SEARCH_ADS,
            400,
            r#"{"code":-1102,"msg":"Mandatory parameter 'asset' was not sent"}"#,
        );
        assert_eq!(
            err,
            UpstreamError::Status {
                endpoint: SEARCH_ADS.into(),
                status: 400,
                message: "Mandatory parameter 'asset' was not sent".into(),
            }
        );

        let err = status_error(SEARCH_ADS, 502, "Bad Gateway");
        assert!(err.to_string().contains("Bad Gateway"));

        let err = status_error(SEARCH_ADS, 503, "");
        assert!(err.to_string().contains("HTTP 503"));
    }
}

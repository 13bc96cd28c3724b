use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use adscout::adapter::inbound::http::{router, ApiState};
use adscout::infrastructure::bootstrap::build_state_with;
use adscout::infrastructure::config::settings::Config;
use adscout::testkit::marketplace::{FakeDesk, ScriptedAdSource};

pub struct TestApp {
    pub router: Router,
    pub state: ApiState,
    pub source: Arc<ScriptedAdSource>,
    pub desk: Arc<FakeDesk>,
}

impl TestApp {
    pub fn new(config: &Config, source: ScriptedAdSource, desk: FakeDesk) -> Self {
        let source = Arc::new(source);
        let desk = Arc::new(desk);
        let state = build_state_with(config, source.clone(), desk.clone());
        Self {
            router: router(state.clone(), false),
            state,
            source,
            desk,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

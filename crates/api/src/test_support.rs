//! In-process router harness for route tests.
//!
//! The state uses a disconnected database and an unreachable rate source, so
//! only paths that never touch either succeed.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
};
use chrono::Utc;
use fairshare_core::currency::{FallbackRates, RateProvider};
use fairshare_quotes::DolarApiSource;
use fairshare_shared::{JwtConfig, JwtService};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{AppState, create_router};

/// State with fallback rates and no database.
pub fn fallback_state() -> AppState {
    // Nothing listens on the discard port
    let source = DolarApiSource::new("http://127.0.0.1:9/v1/cotizaciones", Duration::from_secs(1))
        .expect("client should build");
    let fallback = FallbackRates::default();
    let table = fallback.table("rate source unreachable", Utc::now());

    AppState {
        db: Arc::new(DatabaseConnection::Disconnected),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        rates: Arc::new(RateProvider::with_table(source, fallback, table)),
    }
}

pub struct TestApp {
    router: Router,
    state: AppState,
    token: Option<String>,
}

impl TestApp {
    pub fn new(state: AppState) -> Self {
        Self {
            router: create_router(state.clone()),
            state,
            token: None,
        }
    }

    /// Sends requests with a valid access token for a fresh user.
    pub fn signed_in(mut self) -> Self {
        let token = self
            .state
            .jwt_service
            .generate_access_token(Uuid::new_v4(), "ana@example.com")
            .expect("should generate token");
        self.token = Some(token);
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        self.send(Method::POST, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Non-JSON bodies come back as `Value::Null`.
    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (
            status,
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
        )
    }
}

#![allow(dead_code)]

use ad_dashboard_backend::config::AppConfig;
use ad_dashboard_backend::infrastructure::database;
use ad_dashboard_backend::services::clock::FixedClock;
use ad_dashboard_backend::services::storage::StorageService;
use ad_dashboard_backend::{AppState, create_app};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const PUBLIC_BASE: &str = "https://media.example.test";

/// Records every signing request instead of talking to a bucket.
pub struct MockStorageService {
    pub signed: Mutex<Vec<(String, String, Duration)>>,
    pub fail: bool,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self {
            signed: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("mock signer is down");
        }
        self.signed
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string(), expires_in));
        Ok(format!(
            "https://mock.r2.test/media/{}?X-Amz-Signature=mock",
            key
        ))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", PUBLIC_BASE, key)
    }

    async fn check_bucket(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("mock bucket is down");
        }
        Ok(())
    }
}

/// 2024-06-15T12:00:00Z, the "now" every test app runs at.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub async fn setup_test_db() -> sea_orm::DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    database::run_migrations(&db).await.unwrap();
    db
}

pub struct TestApp {
    pub app: Router,
    pub storage: Arc<MockStorageService>,
}

pub async fn test_app() -> TestApp {
    test_app_with_storage(MockStorageService::new()).await
}

pub async fn test_app_with_storage(storage: MockStorageService) -> TestApp {
    let db = setup_test_db().await;
    let storage = Arc::new(storage);
    let state = AppState::new(
        db,
        storage.clone(),
        Arc::new(FixedClock(fixed_now())),
        AppConfig::development(),
    );

    TestApp {
        app: create_app(state),
        storage,
    }
}

/// Sends one request and returns the status with the JSON body (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    (status, json)
}

pub async fn create_company(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/companies",
        Some(serde_json::json!({
            "name": name,
            "owner_name": "Jordan Lee",
            "email": "owner@example.com",
            "phone": "+1 555 0100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

pub async fn create_media(app: &Router, company_id: Option<i64>, media_type: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/media",
        Some(serde_json::json!({
            "company_id": company_id,
            "name": format!("{} asset", media_type),
            "description": "",
            "media_type": media_type,
            "url": format!("{}/{}-asset", PUBLIC_BASE, media_type)
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

pub async fn create_ad(app: &Router, company_id: i64, start: &str, end: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/ads",
        Some(serde_json::json!({
            "name": "Summer Sale",
            "company_id": company_id,
            "start_date": start,
            "end_date": end,
            "budget": 5000.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

pub async fn create_stat(app: &Router, ad_id: i64, week: &str, spend: f64, leads: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/ad-stats",
        Some(serde_json::json!({
            "ad_id": ad_id,
            "week_start_date": week,
            "spend_usd": spend,
            "leads": leads,
            "clicks": leads * 10,
            "reach": leads * 100
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

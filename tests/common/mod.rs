#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use lr_management::config::{BrandingConfig, EnvironmentConfig};
use lr_management::repositories::{InMemoryLrStore, LrStore};
use lr_management::services::email_service::{EmailReceipt, LrEmail};
use lr_management::services::{AssetStorage, EmailSender, LogoFetcher, MemoryStorage};
use lr_management::utils::errors::{AppError, AppResult};
use lr_management::{create_app_router, AppState, Backend};

/// Guarda los emails en lugar de enviarlos
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<LrEmail>>,
}

impl RecordingEmailSender {
    pub fn sent(&self) -> Vec<LrEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: &LrEmail) -> AppResult<EmailReceipt> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(EmailReceipt {
            provider_id: Some("test-email-id".to_string()),
        })
    }
}

/// Logo azul para URLs `https://logos.test/...`; el resto falla
pub struct StubLogoFetcher;

#[async_trait]
impl LogoFetcher for StubLogoFetcher {
    async fn fetch(&self, url: &str) -> AppResult<DynamicImage> {
        if url.starts_with("https://logos.test/") {
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
                40,
                20,
                Rgb([0, 0, 255]),
            )))
        } else {
            Err(AppError::ExternalApi(format!("unreachable logo {}", url)))
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryLrStore>,
    pub storage: Arc<MemoryStorage>,
    pub mailer: Arc<RecordingEmailSender>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        render_device_scale: 1.0,
        ..EnvironmentConfig::default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryLrStore::new());
        let storage = Arc::new(MemoryStorage::new());
        let mailer = Arc::new(RecordingEmailSender::default());

        let store_backend: Arc<dyn LrStore> = store.clone();
        let storage_backend: Arc<dyn AssetStorage> = storage.clone();
        let mailer_backend: Arc<dyn EmailSender> = mailer.clone();
        let state = AppState::new(
            test_config(),
            BrandingConfig::default(),
            Backend::Ready(store_backend),
        )
        .with_storage(Backend::Ready(storage_backend))
        .with_mailer(Backend::Ready(mailer_backend))
        .with_logo_fetcher(Arc::new(StubLogoFetcher));

        Self {
            router: create_app_router(state),
            store,
            storage,
            mailer,
        }
    }

    /// App sin store ni colaboradores configurados
    pub fn unconfigured() -> Router {
        let state = AppState::new(
            test_config(),
            BrandingConfig::default(),
            Backend::NotConfigured("Record store is not configured (DATABASE_URL)"),
        );
        create_app_router(state)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        send(self.router.clone(), request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(json_request(Method::GET, uri, None)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(json_request(Method::POST, uri, Some(body))).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(json_request(Method::PUT, uri, Some(body))).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(json_request(Method::PATCH, uri, Some(body))).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(json_request(Method::DELETE, uri, None)).await
    }

    /// Crear un LR y devolver su id
    pub async fn create_lr(&self, body: Value) -> String {
        let response = self.post("/api/lr", body).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.json());
        response.json()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Formulario mínimo válido
pub fn lr_form(lr_no: &str) -> Value {
    json!({
        "lrNo": lr_no,
        "truckNo": "HR46E4180",
        "fromPlace": "BARHANA",
        "toPlace": "KARNAL",
        "date": "2025-07-28",
        "items": [
            { "description": "STEEL COILS", "pcs": "10", "weight": "100" }
        ]
    })
}

pub fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 10, 10])))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

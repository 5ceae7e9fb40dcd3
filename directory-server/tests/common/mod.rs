//! Test harness: the full router over the in-memory backend
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use directory_server::core::{Config, ServerState};
use directory_server::lookup::{FixtureLookup, Lookups};
use directory_server::routes::build_app;
use directory_server::store::Backend;
use directory_server::store::memory::{
    MemoryAuth, MemoryProfileStore, MemoryReportStore, MemoryStorage, MemorySupplierStore,
};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const BOUNDARY: &str = "directory-test-boundary";

pub struct TestApp {
    pub state: ServerState,
    pub app: Router,
    pub profiles: Arc<MemoryProfileStore>,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_lookups(FixtureLookup::default())
    }

    pub fn with_lookups(fixture: FixtureLookup) -> Self {
        let config = Config::default();
        let profiles = Arc::new(MemoryProfileStore::default());
        let storage = Arc::new(MemoryStorage::new(&config.logo_bucket));
        let backend = Backend {
            suppliers: Arc::new(MemorySupplierStore::default()),
            reports: Arc::new(MemoryReportStore::default()),
            profiles: profiles.clone(),
            auth: Arc::new(MemoryAuth::default()),
            storage: storage.clone(),
        };

        let state = ServerState::new(config, backend, Lookups::fixture(fixture));
        let app = build_app(&state).with_state(state.clone());

        Self {
            state,
            app,
            profiles,
            storage,
        }
    }

    /// Send a request and return status plus the JSON body (`Null` when empty)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    pub async fn sign_up(&self, email: &str, access_code: &str) -> (StatusCode, Value) {
        self.post(
            "/api/auth/register",
            None,
            json!({
                "email": email,
                "password": "segredo123",
                "nome": email.split('@').next().unwrap_or(email),
                "empresa": "Construtora Teste",
                "setor": "Compras",
                "access_code": access_code,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str) -> (StatusCode, Value) {
        self.post(
            "/api/auth/login",
            None,
            json!({"email": email, "password": "segredo123"}),
        )
        .await
    }

    /// Sign up with `access_code` and return a session token
    pub async fn token_for(&self, email: &str, access_code: &str) -> String {
        let (status, _) = self.sign_up(email, access_code).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = self.login(email).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("admin@obra.com", "admin123").await
    }

    pub async fn searcher_token(&self) -> String {
        self.token_for("busca@obra.com", "buscador123").await
    }

    /// Self-register a supplier through the public endpoint, returning its id
    pub async fn add_supplier(&self, name: &str, whatsapp: &str, tags: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/register",
                None,
                json!({
                    "nome": name,
                    "empresa": format!("{name} Materiais"),
                    "whatsapp": whatsapp,
                    "tags": tags,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_i64().unwrap()
    }
}

/// Error code carried by an error envelope
pub fn error_code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap()
}

/// Single-file multipart body with field name `field`
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

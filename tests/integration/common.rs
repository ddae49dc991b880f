//! Shared helpers for the HTTP tests

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use litclub_server::{
    api,
    config::{AppConfig, AuthConfig, StorageBackend},
    models::user::SessionClaims,
    repository::Repository,
    services::Services,
    AppState,
};

pub const SECRET: &str = "integration-secret";
pub const OWNER: &str = "owner-open-id";

pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_auth(|_| {})
    }

    /// Build the app with adjusted auth settings
    pub fn with_auth(adjust: impl FnOnce(&mut AuthConfig)) -> Self {
        let mut config = AppConfig::default();
        config.database.backend = StorageBackend::Memory;
        config.auth.jwt_secret = SECRET.to_string();
        config.auth.owner_open_id = Some(OWNER.to_string());
        adjust(&mut config.auth);

        let services = Services::new(Repository::in_memory(), config.auth.clone());
        Self {
            router: api::router(AppState::new(config, services)),
        }
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("app_session_id={}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.request(request).await
    }

    /// Every response body, errors included, must be JSON
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, set_cookie, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    /// Create a book as admin and return its id
    pub async fn seed_book(&self, code: &str) -> i64 {
        let response = self
            .post(
                "/api/v1/books",
                Some(&admin_token()),
                serde_json::json!({ "book_code": code, "title": "Gitanjali", "author": "Tagore" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["id"].as_i64().unwrap()
    }
}

pub fn token_for(open_id: &str) -> String {
    let now = Utc::now().timestamp();
    SessionClaims {
        sub: open_id.to_string(),
        name: Some("Test User".to_string()),
        email: None,
        login_method: Some("oauth".to_string()),
        exp: now + 3600,
        iat: now,
    }
    .create_token(SECRET)
    .unwrap()
}

pub fn admin_token() -> String {
    token_for(OWNER)
}

pub fn member_token() -> String {
    token_for("member-open-id")
}

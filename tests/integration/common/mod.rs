//! Common test utilities and fixtures for integration tests
//!
//! - Application setup over the in-memory credential store
//! - Request builders and body parsing
//! - Refresh-cookie helpers
//! - Account fixtures for both roles

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use rb_accounts::InMemoryCredentialStore;
use rb_auth::REFRESH_COOKIE_NAME;
use rb_common::config::Config;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only"; // pragma: allowlist secret

/// Test application: one router per test, fresh store each time
pub struct TestApp {
    pub config: Config,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
            // Lowest cost bcrypt accepts, keeps the suite fast
            "BCRYPT_COST" => Some("4".to_string()),
            _ => None,
        })
        .unwrap();

        let router =
            rb_app::create_app(&config, Arc::new(InMemoryCredentialStore::new())).unwrap();
        Self { config, router }
    }

    pub fn test_router(&self) -> Router {
        self.router.clone()
    }

    /// Send a request and return status, refresh `Set-Cookie` header, JSON body
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.test_router().oneshot(request).await.unwrap();
        TestResponse::read(response).await
    }

    pub async fn register(&self, body: Value) -> TestResponse {
        self.send(json_request(Method::POST, "/auth/register", body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str, user_type: &str) -> TestResponse {
        self.send(json_request(
            Method::POST,
            "/auth/login",
            json!({ "email": email, "password": password, "user_type": user_type }),
        ))
        .await
    }

    pub async fn refresh(&self, refresh_token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri("/auth/refresh");
        if let Some(token) = refresh_token {
            builder = builder.header(header::COOKIE, format!("{REFRESH_COOKIE_NAME}={token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn get_with_bearer(&self, uri: &str, token: &str) -> TestResponse {
        self.send(authed_request(Method::GET, uri, token)).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Response captured for assertions
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestResponse {
    async fn read(response: Response<Body>) -> Self {
        let status = response.status();
        let set_cookie = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(&format!("{REFRESH_COOKIE_NAME}=")))
            .map(str::to_string);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        Self {
            status,
            set_cookie,
            body,
        }
    }

    /// Value of the refresh cookie set by this response
    pub fn refresh_token(&self) -> Option<String> {
        let cookie = self.set_cookie.as_deref()?;
        let pair = cookie.split(';').next()?;
        let value = pair.strip_prefix(&format!("{REFRESH_COOKIE_NAME}="))?;
        Some(value.to_string())
    }

    pub fn access_token(&self) -> String {
        self.body["access_token"]
            .as_str()
            .expect("response carries an access token")
            .to_string()
    }

    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }

    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

/// Helper: build a JSON request
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Helper: build a bearer-authenticated request
pub fn authed_request(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Account fixtures
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn customer(email: &str) -> Value {
        json!({
            "email": email,
            "password": "pw",
            "user_type": "customer",
            "first_name": "Ann",
            "surname": "Lee",
        })
    }

    pub fn restaurant(email: &str, name: &str) -> Value {
        json!({
            "email": email,
            "password": "pw",
            "user_type": "restaurant",
            "name": name,
        })
    }
}

//! Restaurant booking auth service composition root
//!
//! Composes the accounts domain router with the shared infrastructure
//! routes and the browser-facing CORS policy.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use rb_accounts::{AccountService, AccountsState, CredentialStore};
use rb_auth::{AuthBackend, AuthConfig};
use rb_common::config::Config;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(
    config: &Config,
    store: Arc<dyn CredentialStore>,
) -> Result<Router, anyhow::Error> {
    let auth = AuthBackend::new(AuthConfig::from(config))?;
    let accounts_state = AccountsState::new(AccountService::new(store, auth));

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(rb_accounts::routes().with_state(accounts_state))
        .layer(build_cors_layer(&config.cors_allowed_origins));

    Ok(app)
}

/// CORS for the booking front-end. Credentials are allowed so the refresh
/// cookie rides along, which rules out wildcard origins.
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            // tower-http refuses a wildcard alongside credentials
            Ok(_) if origin == "*" => {
                tracing::warn!("ignoring wildcard CORS origin");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    tracing::debug!(count = origins.len(), "CORS origins configured");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

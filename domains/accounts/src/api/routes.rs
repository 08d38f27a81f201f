//! Route definitions for the accounts domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, profile};
use super::middleware::AccountsState;

/// Session routes: register, login, refresh, logout, me
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// Role-scoped profile routes
fn profile_routes() -> Router<AccountsState> {
    Router::new()
        .route("/customers/me", get(profile::customer_me))
        .route("/restaurants/me", get(profile::restaurant_me))
}

/// Create all accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new().merge(auth_routes()).merge(profile_routes())
}

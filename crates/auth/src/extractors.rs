//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::claims::Claims;
use crate::error::AuthError;
use crate::guard::require_role;
use crate::jwt::extract_bearer_token;
use crate::types::Role;

/// Authenticated caller of any role (bearer access token)
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let claims = backend.authenticate(&token)?;

        Ok(AuthUser(claims))
    }
}

/// Customer-only extractor.
///
/// Like `AuthUser` but rejects restaurant accounts with 403 FORBIDDEN.
#[derive(Debug)]
pub struct CustomerUser(pub Claims);

impl<S> FromRequestParts<S> for CustomerUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        Ok(CustomerUser(require_role(claims, &[Role::Customer])?))
    }
}

/// Restaurant-only extractor.
///
/// Like `AuthUser` but rejects customer accounts with 403 FORBIDDEN.
#[derive(Debug)]
pub struct RestaurantUser(pub Claims);

impl<S> FromRequestParts<S> for RestaurantUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        Ok(RestaurantUser(require_role(claims, &[Role::Restaurant])?))
    }
}

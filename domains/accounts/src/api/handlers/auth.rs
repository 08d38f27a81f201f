//! Session API handlers
//!
//! Implements:
//! - POST /auth/register - Create an account and start a session
//! - POST /auth/login - Start a session from email + password
//! - POST /auth/refresh - Rotate the refresh cookie, return a new access token
//! - POST /auth/logout - Drop the refresh cookie
//! - GET /auth/me - Identity carried by the access token

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use rb_auth::{refresh_token_from, AuthUser, Role};
use rb_common::{Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::Registration;
use crate::domain::validation::profile_fields;
use crate::service::Session;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    pub user_type: Role,

    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    pub user_type: Role,
}

/// Body returned whenever a session is started or rotated.
/// The refresh token travels only in the cookie.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_type: Role,
}

impl From<&Session> for TokenResponse {
    fn from(session: &Session) -> Self {
        Self {
            access_token: session.tokens.access_token.clone(),
            token_type: "bearer",
            user_type: session.identity.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub user_type: Role,
}

fn session_response(
    state: &AccountsState,
    jar: CookieJar,
    session: &Session,
) -> (CookieJar, Json<TokenResponse>) {
    let jar = state.auth.store_refresh_cookie(jar, &session.tokens);
    (jar, Json(TokenResponse::from(session)))
}

/// POST /auth/register - Create an account and start a session
pub async fn register(
    State(state): State<AccountsState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(CookieJar, Json<TokenResponse>)> {
    if request.user_type == Role::Customer {
        state
            .accounts
            .ensure_customer_email_free(&request.email)
            .await?;
    }

    let profile = profile_fields(
        request.user_type,
        request.first_name,
        request.surname,
        request.name,
    )?;

    let session = state
        .accounts
        .register(Registration {
            email: request.email,
            password: request.password,
            profile,
        })
        .await?;

    Ok(session_response(&state, jar, &session))
}

/// POST /auth/login - Start a session from email + password
pub async fn login(
    State(state): State<AccountsState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>)> {
    let session = state
        .accounts
        .login(&request.email, &request.password, request.user_type)
        .await?;

    Ok(session_response(&state, jar, &session))
}

/// POST /auth/refresh - Rotate the refresh cookie, return a new access token
pub async fn refresh(
    State(state): State<AccountsState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenResponse>)> {
    let presented = refresh_token_from(&jar);
    let session = state.accounts.refresh(presented.as_deref())?;

    Ok(session_response(&state, jar, &session))
}

/// POST /auth/logout - Drop the refresh cookie
///
/// Tokens are stateless: an already issued refresh token stays valid until
/// it expires. Logout only tells the client to discard it.
pub async fn logout(
    State(state): State<AccountsState>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let jar = state.auth.clear_refresh_cookie(jar);
    (jar, Json(json!({ "status": "ok" })))
}

/// GET /auth/me - Identity carried by the access token
pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    let identity = claims.identity();
    Json(MeResponse {
        email: identity.email,
        user_type: identity.role,
    })
}

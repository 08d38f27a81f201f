//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
///
/// Every token-validation failure (bad signature, expired, malformed, wrong
/// kind, missing claims, missing refresh cookie) is reported as
/// `InvalidToken`; the concrete reason only reaches the debug log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    InvalidCredentials,
    Forbidden,
    TokenIssueFailed,
    PasswordHashFailed,
    InvalidConfiguration,
}

impl AuthError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authorization header required",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Invalid or expired token",
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Invalid credentials",
            ),
            AuthError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Your account type cannot access this resource",
            ),
            AuthError::TokenIssueFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_ERROR",
                "Failed to issue session",
            ),
            AuthError::PasswordHashFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_ERROR",
                "Failed to process credentials",
            ),
            AuthError::InvalidConfiguration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_ERROR",
                "Access token lifetime must be positive and shorter than refresh token lifetime",
            ),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    pub fn message(&self) -> &'static str {
        self.parts().2
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for rb_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden => rb_common::Error::Authorization(err.message().to_string()),
            AuthError::TokenIssueFailed
            | AuthError::PasswordHashFailed
            | AuthError::InvalidConfiguration => {
                rb_common::Error::Internal(err.message().to_string())
            }
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials => {
                rb_common::Error::Authentication(err.message().to_string())
            }
        }
    }
}

//! JWT claims types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::types::{Identity, Role, TokenKind};

/// Claims carried by every session token.
///
/// The schema is closed: a token missing `sub`, `role`, `token_kind` or `exp`
/// does not deserialize and is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,
    /// Account role
    pub role: Role,
    /// Access or refresh
    pub token_kind: TokenKind,
    /// Issued at
    pub iat: i64,
    /// Expires at
    pub exp: i64,
    /// Unique token id, so two tokens minted in the same second still differ
    pub jti: String,
}

impl Claims {
    /// Build claims for `identity` valid for `ttl` from `issued_at`.
    ///
    /// An expiry past the representable date range is `TokenIssueFailed`.
    pub fn new(
        identity: &Identity,
        token_kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, AuthError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            tracing::error!(ttl_seconds = ttl.num_seconds(), "Token expiry out of range");
            AuthError::TokenIssueFailed
        })?;

        Ok(Self {
            sub: identity.email.clone(),
            role: identity.role,
            token_kind,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.sub.clone(), self.role)
    }

    pub fn is_customer(&self) -> bool {
        self.role == Role::Customer
    }

    pub fn is_restaurant(&self) -> bool {
        self.role == Role::Restaurant
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

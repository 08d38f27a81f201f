//! Concrete authentication backend
//!
//! Bundles the token codec, session issuer, password hasher and cookie
//! policy built from one `AuthConfig`. Cheap to clone; all state is
//! immutable after construction.
//!
//! Domain states expose this via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::sync::Arc;

use axum_extra::extract::CookieJar;

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::cookie::CookiePolicy;
use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::password::PasswordHasher;
use crate::session::SessionIssuer;
use crate::types::{Identity, Role, TokenPair};

#[derive(Clone, Debug)]
pub struct AuthBackend {
    codec: Arc<TokenCodec>,
    issuer: SessionIssuer,
    hasher: PasswordHasher,
    cookie: CookiePolicy,
}

impl AuthBackend {
    /// Fails with `InvalidConfiguration` when the access lifetime is not
    /// positive and strictly shorter than the refresh lifetime
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        let codec = Arc::new(TokenCodec::new(&config.jwt_secret));
        let issuer = SessionIssuer::new(
            codec.clone(),
            config.access_token_ttl,
            config.refresh_token_ttl,
        )?;

        Ok(Self {
            codec,
            issuer,
            hasher: PasswordHasher::new(config.bcrypt_cost),
            cookie: config.cookie,
        })
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn issuer(&self) -> &SessionIssuer {
        &self.issuer
    }

    pub fn hasher(&self) -> PasswordHasher {
        self.hasher
    }

    pub fn cookie_policy(&self) -> &CookiePolicy {
        &self.cookie
    }

    /// Start a session for an identity whose credentials were just verified
    pub fn issue_session(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        self.issuer.issue_pair(identity)
    }

    /// Validate a bearer access token
    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        crate::guard::authenticate(&self.codec, token)
    }

    /// Validate a bearer access token and require one of `allowed` roles
    pub fn authorize(&self, token: &str, allowed: &[Role]) -> Result<Claims, AuthError> {
        let claims = self.authenticate(token)?;
        crate::guard::require_role(claims, allowed)
    }

    /// Redeem a refresh token for a new pair
    pub fn rotate(&self, presented: Option<&str>) -> Result<(Identity, TokenPair), AuthError> {
        crate::refresh::rotate(&self.codec, &self.issuer, presented)
    }

    /// Put the refresh half of `pair` into the outgoing cookie jar
    pub fn store_refresh_cookie(&self, jar: CookieJar, pair: &TokenPair) -> CookieJar {
        self.cookie
            .set_refresh(jar, pair.refresh_token.clone(), self.issuer.refresh_ttl())
    }

    /// Tell the client to drop its refresh cookie
    pub fn clear_refresh_cookie(&self, jar: CookieJar) -> CookieJar {
        self.cookie.clear_refresh(jar)
    }
}

//! Refresh-token cookie lifecycle
//!
//! The refresh token only travels in an HTTP-only cookie. Every issuance path
//! (register, login, refresh) and the logout path build the cookie from the
//! same `CookiePolicy`, so the attributes never drift between endpoints.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Cookie carrying the refresh token
pub const REFRESH_COOKIE_NAME: &str = "rb_refresh";

/// Cookie attributes for the refresh token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

impl CookiePolicy {
    /// Cross-site deployments (frontend on another site) need `SameSite=None`,
    /// which browsers only accept together with `Secure`.
    pub fn from_env_flags(cross_site: bool, secure: bool) -> Self {
        if cross_site {
            Self {
                secure: true,
                same_site: SameSite::None,
            }
        } else {
            Self {
                secure,
                same_site: SameSite::Lax,
            }
        }
    }

    /// Cookie storing a freshly issued refresh token
    pub fn refresh_cookie(&self, token: String, max_age: chrono::Duration) -> Cookie<'static> {
        Cookie::build((REFRESH_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(time::Duration::seconds(max_age.num_seconds()))
            .build()
    }

    /// Store `token` in the jar, replacing any refresh cookie the client sent
    pub fn set_refresh(
        &self,
        jar: CookieJar,
        token: String,
        max_age: chrono::Duration,
    ) -> CookieJar {
        jar.add(self.refresh_cookie(token, max_age))
    }

    /// Instruct the client to discard its refresh cookie.
    ///
    /// Always emits an expired cookie, even when the request carried none.
    pub fn clear_refresh(&self, jar: CookieJar) -> CookieJar {
        let mut removal = Cookie::build((REFRESH_COOKIE_NAME, ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .build();
        removal.make_removal();
        jar.add(removal)
    }
}

/// Refresh token presented by the client, if any
pub fn refresh_token_from(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

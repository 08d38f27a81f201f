//! Authentication configuration

use chrono::Duration;
use rb_common::Config;

use crate::cookie::CookiePolicy;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub cookie: CookiePolicy,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Default lifetimes (30 minutes / 7 days), same-site cookie policy
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_ttl: Duration::minutes(rb_common::config::DEFAULT_ACCESS_TOKEN_TTL_MINUTES),
            refresh_token_ttl: Duration::days(rb_common::config::DEFAULT_REFRESH_TOKEN_TTL_DAYS),
            cookie: CookiePolicy::default(),
            bcrypt_cost: rb_common::config::DEFAULT_BCRYPT_COST,
        }
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            access_token_ttl: Duration::minutes(config.access_token_ttl_minutes),
            refresh_token_ttl: Duration::days(config.refresh_token_ttl_days),
            cookie: CookiePolicy::from_env_flags(config.cookie_cross_site, config.cookie_secure),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

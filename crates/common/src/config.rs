//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 7;
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const DEFAULT_PORT: u16 = 8547;

/// Upper bound on the refresh lifetime (ten years); also bounds access tokens
pub const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 3650;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HS256 signing secret shared by every token operation
    pub jwt_secret: String,

    /// Token lifetimes
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,

    /// Refresh cookie attributes
    pub cookie_cross_site: bool,
    pub cookie_secure: bool,

    /// Password hashing cost factor
    pub bcrypt_cost: u32,

    /// Postgres credential store; in-memory store when unset
    pub database_url: Option<String>,

    /// Comma-separated browser origins allowed to call the API with credentials
    pub cors_allowed_origins: String,

    /// Runtime configuration
    pub rust_log: String,
    pub log_format: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET is required"))?,

            access_token_ttl_minutes: parse_or(
                &lookup,
                "ACCESS_TOKEN_TTL_MINUTES",
                DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
            )?,
            refresh_token_ttl_days: parse_or(
                &lookup,
                "REFRESH_TOKEN_TTL_DAYS",
                DEFAULT_REFRESH_TOKEN_TTL_DAYS,
            )?,

            cookie_cross_site: parse_or(&lookup, "COOKIE_CROSS_SITE", false)?,
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", false)?,

            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?,

            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5173".to_string()),

            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "rb=debug,tower_http=info".to_string()),
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Reject configurations that would break the session model.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        if self.access_token_ttl_minutes <= 0 {
            bail!("ACCESS_TOKEN_TTL_MINUTES must be positive");
        }
        if self.refresh_token_ttl_days <= 0 {
            bail!("REFRESH_TOKEN_TTL_DAYS must be positive");
        }
        if self.refresh_token_ttl_days > MAX_REFRESH_TOKEN_TTL_DAYS {
            bail!(
                "REFRESH_TOKEN_TTL_DAYS must not exceed {}",
                MAX_REFRESH_TOKEN_TTL_DAYS
            );
        }
        let refresh_minutes = self
            .refresh_token_ttl_days
            .checked_mul(24 * 60)
            .ok_or_else(|| anyhow::anyhow!("REFRESH_TOKEN_TTL_DAYS is out of range"))?;
        // Access tokens ride on every request, so their window has to be the short one.
        if self.access_token_ttl_minutes >= refresh_minutes {
            bail!("access token lifetime must be shorter than refresh token lifetime");
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

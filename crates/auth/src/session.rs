//! Session issuance: access + refresh token pairs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::claims::Claims;
use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::types::{Identity, TokenKind, TokenPair};

/// Mints tokens for a verified identity. Holds no state beyond the codec and
/// the two lifetimes.
#[derive(Debug, Clone)]
pub struct SessionIssuer {
    codec: Arc<TokenCodec>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionIssuer {
    /// Fails unless `Duration::zero() < access_ttl < refresh_ttl`
    pub fn new(
        codec: Arc<TokenCodec>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, AuthError> {
        if access_ttl <= Duration::zero() || access_ttl >= refresh_ttl {
            tracing::error!(
                access_ttl_seconds = access_ttl.num_seconds(),
                refresh_ttl_seconds = refresh_ttl.num_seconds(),
                "Rejected token lifetimes"
            );
            return Err(AuthError::InvalidConfiguration);
        }

        Ok(Self {
            codec,
            access_ttl,
            refresh_ttl,
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    fn ttl_for(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    /// Mint a token of `kind` as of `now`
    pub fn mint_at(
        &self,
        identity: &Identity,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims::new(identity, kind, now, self.ttl_for(kind))?;
        self.codec.encode(&claims)
    }

    pub fn issue_access(&self, identity: &Identity) -> Result<String, AuthError> {
        self.mint_at(identity, TokenKind::Access, Utc::now())
    }

    pub fn issue_refresh(&self, identity: &Identity) -> Result<String, AuthError> {
        self.mint_at(identity, TokenKind::Refresh, Utc::now())
    }

    /// Both halves of a session, stamped with the same issue time
    pub fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let pair = TokenPair {
            access_token: self.mint_at(identity, TokenKind::Access, now)?,
            refresh_token: self.mint_at(identity, TokenKind::Refresh, now)?,
        };

        tracing::debug!(
            email = %identity.email,
            role = %identity.role,
            "Issued session tokens"
        );

        Ok(pair)
    }
}

//! Refresh-token rotation
//!
//! A refresh token is redeemed for a brand-new access/refresh pair. The old
//! refresh token is not revoked (there is no revocation store); callers
//! overwrite the client's cookie with the new one.

use crate::error::AuthError;
use crate::guard::verified_claims;
use crate::jwt::TokenCodec;
use crate::session::SessionIssuer;
use crate::types::{Identity, TokenKind, TokenPair};

/// Redeem `presented` for a new session.
///
/// Missing, undecodable, expired, access-kind or subject-less tokens all
/// yield `AuthError::InvalidToken`.
pub fn rotate(
    codec: &TokenCodec,
    issuer: &SessionIssuer,
    presented: Option<&str>,
) -> Result<(Identity, TokenPair), AuthError> {
    let Some(token) = presented.filter(|t| !t.is_empty()) else {
        tracing::debug!("Refresh rejected: no refresh token presented");
        return Err(AuthError::InvalidToken);
    };

    let claims = verified_claims(codec, token, TokenKind::Refresh).map_err(|reason| {
        tracing::debug!(%reason, "Refresh rejected");
        AuthError::InvalidToken
    })?;

    let identity = claims.identity();
    let pair = issuer.issue_pair(&identity)?;

    tracing::info!(email = %identity.email, role = %identity.role, "Session rotated");

    Ok((identity, pair))
}

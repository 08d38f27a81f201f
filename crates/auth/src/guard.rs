//! Authorization guard and role filter

use crate::claims::Claims;
use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::types::{Role, TokenKind};

/// Why a presented token was refused. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    Undecodable,
    WrongKind(TokenKind),
    MissingClaims,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Undecodable => write!(f, "undecodable, bad signature or expired"),
            Rejection::WrongKind(found) => write!(f, "unexpected token kind {}", found),
            Rejection::MissingClaims => write!(f, "missing subject"),
        }
    }
}

/// Decode `token` and require it to be of `expected` kind with a subject.
pub(crate) fn verified_claims(
    codec: &TokenCodec,
    token: &str,
    expected: TokenKind,
) -> Result<Claims, Rejection> {
    let claims = codec.decode(token).ok_or(Rejection::Undecodable)?;

    if claims.token_kind != expected {
        return Err(Rejection::WrongKind(claims.token_kind));
    }

    // Role is a closed enum and cannot be absent once decoded; subject can be blank.
    if claims.sub.trim().is_empty() {
        return Err(Rejection::MissingClaims);
    }

    Ok(claims)
}

/// Validate a bearer access token and return its claims
pub fn authenticate(codec: &TokenCodec, token: &str) -> Result<Claims, AuthError> {
    verified_claims(codec, token, TokenKind::Access).map_err(|reason| {
        tracing::debug!(%reason, "Access token rejected");
        AuthError::InvalidToken
    })
}

/// Pass `claims` through if its role is one of `allowed`
pub fn require_role(claims: Claims, allowed: &[Role]) -> Result<Claims, AuthError> {
    if allowed.contains(&claims.role) {
        Ok(claims)
    } else {
        tracing::debug!(
            email = %claims.sub,
            role = %claims.role,
            "Role not permitted for this resource"
        );
        Err(AuthError::Forbidden)
    }
}

//! Password hashing
//!
//! bcrypt with a configurable cost. Digests are self-describing
//! (`$2b$<cost>$<salt+hash>`), so a cost change only affects new hashes.

use crate::error::AuthError;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Salted one-way digest of `plaintext`
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AuthError::PasswordHashFailed
        })
    }

    /// `true` only when `plaintext` matches `digest`. A malformed digest is a
    /// mismatch, not an error.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password digest could not be parsed");
                false
            }
        }
    }
}

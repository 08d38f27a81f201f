//! Authentication core for the restaurant booking service
//!
//! Provides password hashing, signed session tokens (short-lived access,
//! rotating refresh), the refresh-cookie policy, and axum extractors that
//! work with any state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod cookie;
mod error;
mod extractors;
mod guard;
mod jwt;
mod password;
mod refresh;
mod session;
mod types;

pub use backend::AuthBackend;
pub use claims::Claims;
pub use config::AuthConfig;
pub use cookie::{refresh_token_from, CookiePolicy, REFRESH_COOKIE_NAME};
pub use error::AuthError;
pub use extractors::{AuthUser, CustomerUser, RestaurantUser};
pub use guard::{authenticate, require_role};
pub use jwt::TokenCodec;
pub use password::PasswordHasher;
pub use refresh::rotate;
pub use session::SessionIssuer;
pub use types::{Identity, Role, TokenKind, TokenPair};

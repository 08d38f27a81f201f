//! Accounts domain: customer and restaurant credentials, sessions, profiles

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

pub use repository::{CredentialStore, InMemoryCredentialStore, PgCredentialStore};
pub use service::{AccountService, Session};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;

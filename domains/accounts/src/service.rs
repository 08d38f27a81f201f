//! Account service: registration, login, refresh and profile lookup
//!
//! Sits between the HTTP handlers and the credential store. Tokens come from
//! the shared `AuthBackend`; bcrypt work is pushed onto the blocking pool.

use std::sync::Arc;

use rb_auth::{AuthBackend, AuthError, Identity, Role, TokenPair};
use rb_common::{Error, Result};
use tokio::sync::OnceCell;

use crate::domain::entities::{
    CustomerAccount, NewCustomer, NewRestaurant, ProfileFields, Registration, RestaurantAccount,
};
use crate::repository::{
    CredentialStore, CUSTOMER_EXISTS, RESTAURANT_EMAIL_EXISTS, RESTAURANT_NAME_EXISTS,
};

/// A freshly started or rotated session
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub tokens: TokenPair,
}

/// Password verified on the unknown-account login path
const UNKNOWN_ACCOUNT_PASSWORD: &str = "unknown-account";

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    auth: AuthBackend,
    /// Digest at the configured cost, hashed on first use
    unknown_account_digest: Arc<OnceCell<String>>,
}

impl AccountService {
    pub fn new(store: Arc<dyn CredentialStore>, auth: AuthBackend) -> Self {
        Self {
            store,
            auth,
            unknown_account_digest: Arc::new(OnceCell::new()),
        }
    }

    pub fn auth(&self) -> &AuthBackend {
        &self.auth
    }

    /// Fails with the duplicate-customer conflict if `email` is taken
    pub async fn ensure_customer_email_free(&self, email: &str) -> Result<()> {
        if self.store.customer_email_exists(email).await? {
            return Err(Error::Conflict(CUSTOMER_EXISTS.to_string()));
        }
        Ok(())
    }

    /// Create an account and start a session for it
    pub async fn register(&self, registration: Registration) -> Result<Session> {
        let Registration {
            email,
            password,
            profile,
        } = registration;

        let identity = match profile {
            ProfileFields::Customer {
                first_name,
                surname,
            } => {
                self.ensure_customer_email_free(&email).await?;

                let password_hash = self.hash_password(password).await?;
                let customer = self
                    .store
                    .create_customer(NewCustomer {
                        email,
                        first_name,
                        surname,
                        password_hash,
                    })
                    .await?;

                Identity::new(customer.email, Role::Customer)
            }
            ProfileFields::Restaurant { name } => {
                if self.store.restaurant_email_exists(&email).await? {
                    return Err(Error::Conflict(RESTAURANT_EMAIL_EXISTS.to_string()));
                }
                if self.store.restaurant_name_exists(&name).await? {
                    return Err(Error::Conflict(RESTAURANT_NAME_EXISTS.to_string()));
                }

                let password_hash = self.hash_password(password).await?;
                let restaurant = self
                    .store
                    .create_restaurant(NewRestaurant {
                        email,
                        name,
                        password_hash,
                    })
                    .await?;

                Identity::new(restaurant.email, Role::Restaurant)
            }
        };

        tracing::info!(email = %identity.email, role = %identity.role, "account registered");
        self.start_session(identity)
    }

    /// Verify credentials against the `role` namespace.
    ///
    /// Unknown email and wrong password fail the same way, and both pay for
    /// one bcrypt verification.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<Session> {
        let Some(record) = self.store.find_credentials(email, role).await? else {
            tracing::debug!(role = %role, "login for unknown account");
            let digest = self.unknown_account_digest().await?;
            self.verify_password(password.to_string(), digest).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .verify_password(password.to_string(), record.password_hash)
            .await?
        {
            tracing::debug!(role = %role, "login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let identity = Identity::new(record.email, role);
        tracing::info!(email = %identity.email, role = %identity.role, "logged in");
        self.start_session(identity)
    }

    /// Redeem a refresh token. The store is not consulted.
    pub fn refresh(&self, presented: Option<&str>) -> Result<Session> {
        let (identity, tokens) = self.auth.rotate(presented)?;
        Ok(Session { identity, tokens })
    }

    pub async fn customer_profile(&self, email: &str) -> Result<CustomerAccount> {
        self.store
            .find_customer(email)
            .await?
            .ok_or_else(|| Error::NotFound("Customer not found".to_string()))
    }

    pub async fn restaurant_profile(&self, email: &str) -> Result<RestaurantAccount> {
        self.store
            .find_restaurant(email)
            .await?
            .ok_or_else(|| Error::NotFound("Restaurant not found".to_string()))
    }

    fn start_session(&self, identity: Identity) -> Result<Session> {
        let tokens = self.auth.issue_session(&identity)?;
        Ok(Session { identity, tokens })
    }

    async fn unknown_account_digest(&self) -> Result<String> {
        let digest = self
            .unknown_account_digest
            .get_or_try_init(|| self.hash_password(UNKNOWN_ACCOUNT_PASSWORD.to_string()))
            .await?;
        Ok(digest.clone())
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = self.auth.hasher();
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| Error::Internal(format!("password hashing task failed: {e}")))??;
        Ok(digest)
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool> {
        let hasher = self.auth.hasher();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| Error::Internal(format!("password verification task failed: {e}")))
    }
}

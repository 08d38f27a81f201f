//! Domain entities for the accounts domain
//!
//! Customers and restaurants are separate account namespaces: the same email
//! may hold one account of each kind.

use chrono::{DateTime, Utc};
use rb_auth::Role;
use serde::Serialize;
use uuid::Uuid;

/// Customer account
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CustomerAccount {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub surname: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Restaurant account. `microsite_name` is the public booking slug and
/// starts out equal to `name`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RestaurantAccount {
    pub id: Uuid,
    pub name: String,
    pub microsite_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// What login needs from the store: nothing but the stored digest
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CredentialRecord {
    pub email: String,
    pub password_hash: String,
}

/// Role-specific fields collected at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileFields {
    Customer { first_name: String, surname: String },
    Restaurant { name: String },
}

impl ProfileFields {
    pub fn role(&self) -> Role {
        match self {
            ProfileFields::Customer { .. } => Role::Customer,
            ProfileFields::Restaurant { .. } => Role::Restaurant,
        }
    }
}

/// A validated registration, password still in plaintext
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub profile: ProfileFields,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

impl Registration {
    pub fn role(&self) -> Role {
        self.profile.role()
    }
}

/// Customer row to insert; password already hashed
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub email: String,
    pub first_name: String,
    pub surname: String,
    pub password_hash: String,
}

/// Restaurant row to insert; password already hashed
#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl From<NewCustomer> for CustomerAccount {
    fn from(new: NewCustomer) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: new.email,
            first_name: new.first_name,
            surname: new.surname,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        }
    }
}

impl From<NewRestaurant> for RestaurantAccount {
    fn from(new: NewRestaurant) -> Self {
        Self {
            id: Uuid::new_v4(),
            microsite_name: new.name.clone(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        }
    }
}

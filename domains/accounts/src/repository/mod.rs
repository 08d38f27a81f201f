//! Credential store boundary for the accounts domain
//!
//! The auth core never owns user records. It asks a `CredentialStore` for
//! the stored digest of `(email, role)` and hands new accounts to it at
//! registration.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use rb_auth::Role;
use rb_common::Result;

use crate::domain::entities::{
    CredentialRecord, CustomerAccount, NewCustomer, NewRestaurant, RestaurantAccount,
};

pub use memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;

pub const CUSTOMER_EXISTS: &str = "Customer already exists";
pub const RESTAURANT_EMAIL_EXISTS: &str = "Restaurant email already exists";
pub const RESTAURANT_NAME_EXISTS: &str = "Restaurant name already exists";

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored digest for `email` in the `role` namespace
    async fn find_credentials(&self, email: &str, role: Role) -> Result<Option<CredentialRecord>>;

    async fn customer_email_exists(&self, email: &str) -> Result<bool>;

    async fn restaurant_email_exists(&self, email: &str) -> Result<bool>;

    async fn restaurant_name_exists(&self, name: &str) -> Result<bool>;

    /// Insert a customer. A duplicate email is a `Conflict`.
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerAccount>;

    /// Insert a restaurant. A duplicate email or name is a `Conflict`.
    async fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<RestaurantAccount>;

    async fn find_customer(&self, email: &str) -> Result<Option<CustomerAccount>>;

    async fn find_restaurant(&self, email: &str) -> Result<Option<RestaurantAccount>>;
}

//! In-process credential store
//!
//! Backs tests and database-less local runs. Uniqueness is enforced under
//! the write lock, mirroring the table constraints of the Postgres store.

use std::collections::HashMap;

use async_trait::async_trait;
use rb_auth::Role;
use rb_common::{Error, Result};
use tokio::sync::RwLock;

use super::{CredentialStore, CUSTOMER_EXISTS, RESTAURANT_EMAIL_EXISTS, RESTAURANT_NAME_EXISTS};
use crate::domain::entities::{
    CredentialRecord, CustomerAccount, NewCustomer, NewRestaurant, RestaurantAccount,
};

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    customers: RwLock<HashMap<String, CustomerAccount>>,
    restaurants: RwLock<HashMap<String, RestaurantAccount>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_credentials(&self, email: &str, role: Role) -> Result<Option<CredentialRecord>> {
        let record = match role {
            Role::Customer => self.customers.read().await.get(email).map(|c| CredentialRecord {
                email: c.email.clone(),
                password_hash: c.password_hash.clone(),
            }),
            Role::Restaurant => self
                .restaurants
                .read()
                .await
                .get(email)
                .map(|r| CredentialRecord {
                    email: r.email.clone(),
                    password_hash: r.password_hash.clone(),
                }),
        };
        Ok(record)
    }

    async fn customer_email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.customers.read().await.contains_key(email))
    }

    async fn restaurant_email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.restaurants.read().await.contains_key(email))
    }

    async fn restaurant_name_exists(&self, name: &str) -> Result<bool> {
        Ok(self
            .restaurants
            .read()
            .await
            .values()
            .any(|r| r.name == name))
    }

    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerAccount> {
        let mut customers = self.customers.write().await;
        if customers.contains_key(&customer.email) {
            return Err(Error::Conflict(CUSTOMER_EXISTS.to_string()));
        }

        let account = CustomerAccount::from(customer);
        customers.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<RestaurantAccount> {
        let mut restaurants = self.restaurants.write().await;
        if restaurants.contains_key(&restaurant.email) {
            return Err(Error::Conflict(RESTAURANT_EMAIL_EXISTS.to_string()));
        }
        if restaurants.values().any(|r| r.name == restaurant.name) {
            return Err(Error::Conflict(RESTAURANT_NAME_EXISTS.to_string()));
        }

        let account = RestaurantAccount::from(restaurant);
        restaurants.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn find_customer(&self, email: &str) -> Result<Option<CustomerAccount>> {
        Ok(self.customers.read().await.get(email).cloned())
    }

    async fn find_restaurant(&self, email: &str) -> Result<Option<RestaurantAccount>> {
        Ok(self.restaurants.read().await.get(email).cloned())
    }
}

//! Postgres-backed credential store

use async_trait::async_trait;
use rb_auth::Role;
use rb_common::{Error, Result};
use sqlx::PgPool;

use super::{CredentialStore, CUSTOMER_EXISTS, RESTAURANT_EMAIL_EXISTS, RESTAURANT_NAME_EXISTS};
use crate::domain::entities::{
    CredentialRecord, CustomerAccount, NewCustomer, NewRestaurant, RestaurantAccount,
};

/// Map a unique-constraint violation to the conflict message for that column
fn conflict_or(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            let message = match db_err.constraint() {
                Some("restaurants_email_key") => RESTAURANT_EMAIL_EXISTS,
                Some("restaurants_name_key") => RESTAURANT_NAME_EXISTS,
                _ => CUSTOMER_EXISTS,
            };
            Error::Conflict(message.to_string())
        }
        _ => Error::from(err),
    }
}

#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_credentials(&self, email: &str, role: Role) -> Result<Option<CredentialRecord>> {
        let sql = match role {
            Role::Customer => "SELECT email, password_hash FROM customers WHERE email = $1",
            Role::Restaurant => "SELECT email, password_hash FROM restaurants WHERE email = $1",
        };

        let record = sqlx::query_as::<_, CredentialRecord>(sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn customer_email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn restaurant_email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM restaurants WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn restaurant_name_exists(&self, name: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM restaurants WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerAccount> {
        let account = CustomerAccount::from(customer);

        sqlx::query(
            r#"
            INSERT INTO customers (id, email, first_name, surname, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.surname)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(conflict_or)?;

        Ok(account)
    }

    async fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<RestaurantAccount> {
        let account = RestaurantAccount::from(restaurant);

        sqlx::query(
            r#"
            INSERT INTO restaurants (id, name, microsite_name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.microsite_name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(conflict_or)?;

        Ok(account)
    }

    async fn find_customer(&self, email: &str) -> Result<Option<CustomerAccount>> {
        let customer = sqlx::query_as::<_, CustomerAccount>(
            r#"
            SELECT id, email, first_name, surname, password_hash, created_at
            FROM customers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn find_restaurant(&self, email: &str) -> Result<Option<RestaurantAccount>> {
        let restaurant = sqlx::query_as::<_, RestaurantAccount>(
            r#"
            SELECT id, name, microsite_name, email, password_hash, created_at
            FROM restaurants
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(restaurant)
    }
}

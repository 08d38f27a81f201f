//! Role-scoped profile handlers
//!
//! - GET /customers/me - Customer profile (customers only)
//! - GET /restaurants/me - Restaurant profile (restaurants only)

use axum::{extract::State, Json};
use rb_auth::{CustomerUser, RestaurantUser};
use rb_common::Result;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{CustomerAccount, RestaurantAccount};

/// GET /customers/me
pub async fn customer_me(
    CustomerUser(claims): CustomerUser,
    State(state): State<AccountsState>,
) -> Result<Json<CustomerAccount>> {
    let customer = state.accounts.customer_profile(&claims.sub).await?;
    Ok(Json(customer))
}

/// GET /restaurants/me
pub async fn restaurant_me(
    RestaurantUser(claims): RestaurantUser,
    State(state): State<AccountsState>,
) -> Result<Json<RestaurantAccount>> {
    let restaurant = state.accounts.restaurant_profile(&claims.sub).await?;
    Ok(Json(restaurant))
}

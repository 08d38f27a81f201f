//! Accounts domain state and auth backend integration

use axum::extract::FromRef;
use rb_auth::AuthBackend;

use crate::service::AccountService;

/// Application state for the accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub accounts: AccountService,
    pub auth: AuthBackend,
}

impl AccountsState {
    pub fn new(accounts: AccountService) -> Self {
        let auth = accounts.auth().clone();
        Self { accounts, auth }
    }
}

impl FromRef<AccountsState> for AuthBackend {
    fn from_ref(state: &AccountsState) -> Self {
        state.auth.clone()
    }
}

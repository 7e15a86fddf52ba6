//! The JSON endpoints for managing accounts.
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    Error,
    account::{Account, AccountForm},
    state::AccountState,
    stores::AccountStore,
};

/// List every account.
pub async fn list_accounts_endpoint<A>(
    State(state): State<AccountState<A>>,
) -> Result<Json<Vec<Account>>, Error>
where
    A: AccountStore + Clone + Send + Sync + 'static,
{
    state.account_manager.list().map(Json)
}

/// Get a single account by name, or 404 if absent.
pub async fn get_account_endpoint<A>(
    State(state): State<AccountState<A>>,
    Path(account_name): Path<String>,
) -> Result<Json<Account>, Error>
where
    A: AccountStore + Clone + Send + Sync + 'static,
{
    state.account_manager.get(&account_name).map(Json)
}

/// Create a new account from a JSON body.
pub async fn create_account_endpoint<A>(
    State(state): State<AccountState<A>>,
    Json(form): Json<AccountForm>,
) -> Result<impl IntoResponse, Error>
where
    A: AccountStore + Clone + Send + Sync + 'static,
{
    let mut manager = state.account_manager;
    let account = manager.create(form)?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Rename an account, or 404 if no account matched the name.
pub async fn update_account_endpoint<A>(
    State(state): State<AccountState<A>>,
    Path(account_name): Path<String>,
    Json(form): Json<AccountForm>,
) -> Result<Json<Account>, Error>
where
    A: AccountStore + Clone + Send + Sync + 'static,
{
    let mut manager = state.account_manager;

    match manager.update(&account_name, form)? {
        Some(account) => Ok(Json(account)),
        None => Err(Error::AccountNotFound(account_name)),
    }
}

/// Delete an account, or 404 if no account matched the name.
pub async fn delete_account_endpoint<A>(
    State(state): State<AccountState<A>>,
    Path(account_name): Path<String>,
) -> Result<impl IntoResponse, Error>
where
    A: AccountStore + Clone + Send + Sync + 'static,
{
    let mut manager = state.account_manager;

    if manager.delete(&account_name)? {
        Ok(Json(json!({ "message": "Account deleted successfully" })))
    } else {
        Err(Error::AccountNotFound(account_name))
    }
}

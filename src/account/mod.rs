//! Account management: the model, invariants and JSON endpoints.

mod core;
mod endpoints;
mod manager;

pub use core::{Account, AccountForm};
pub use endpoints::{
    create_account_endpoint, delete_account_endpoint, get_account_endpoint,
    list_accounts_endpoint, update_account_endpoint,
};
pub use manager::AccountManager;

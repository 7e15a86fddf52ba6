//! Implements a struct that holds the state of the REST server.

use std::marker::{Send, Sync};

use axum::extract::FromRef;

use crate::{
    account::AccountManager,
    stores::{AccountStore, TransactionStore},
    transaction::TransactionManager,
};

/// The state of the REST server.
///
/// Both managers share the same underlying account store: the transaction
/// manager holds a clone of the account manager so that bulk ingestion can
/// auto-provision accounts.
#[derive(Debug, Clone)]
pub struct AppState<A, T>
where
    A: AccountStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    /// The manager for account lifecycle and invariants.
    pub account_manager: AccountManager<A>,
    /// The manager for transaction lifecycle, validation and bulk ingestion.
    pub transaction_manager: TransactionManager<T, A>,
}

impl<A, T> AppState<A, T>
where
    A: AccountStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    /// Create a new [AppState] from the two stores.
    pub fn new(account_store: A, transaction_store: T) -> Self {
        let account_manager = AccountManager::new(account_store);

        Self {
            transaction_manager: TransactionManager::new(
                transaction_store,
                account_manager.clone(),
            ),
            account_manager,
        }
    }
}

/// The state needed by the account endpoints.
#[derive(Debug, Clone)]
pub struct AccountState<A>
where
    A: AccountStore + Clone + Send + Sync,
{
    /// The manager for account lifecycle and invariants.
    pub account_manager: AccountManager<A>,
}

impl<A, T> FromRef<AppState<A, T>> for AccountState<A>
where
    A: AccountStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<A, T>) -> Self {
        Self {
            account_manager: state.account_manager.clone(),
        }
    }
}

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState<T, A>
where
    A: AccountStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    /// The manager for transaction lifecycle, validation and bulk ingestion.
    pub transaction_manager: TransactionManager<T, A>,
}

impl<A, T> FromRef<AppState<A, T>> for TransactionState<T, A>
where
    A: AccountStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<A, T>) -> Self {
        Self {
            transaction_manager: state.transaction_manager.clone(),
        }
    }
}

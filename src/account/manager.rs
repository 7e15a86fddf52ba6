//! Enforces account invariants atop an [AccountStore].

use crate::{
    Error,
    account::{Account, AccountForm},
    stores::AccountStore,
};

/// Validates account payloads and delegates persistence to the store.
///
/// The store's primary key uniqueness is the authoritative duplicate check:
/// the manager's own existence check can be raced by a concurrent create, in
/// which case the loser still gets [Error::DuplicateAccount] from the store.
#[derive(Debug, Clone)]
pub struct AccountManager<S>
where
    S: AccountStore,
{
    store: S,
}

impl<S> AccountManager<S>
where
    S: AccountStore,
{
    /// Create a manager backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Retrieve all accounts, in store iteration order.
    pub fn list(&self) -> Result<Vec<Account>, Error> {
        self.store.get_all()
    }

    /// Retrieve the account named `account_name`.
    ///
    /// # Errors
    /// Returns [Error::AccountNotFound] if no such account exists.
    pub fn get(&self, account_name: &str) -> Result<Account, Error> {
        self.store
            .get(account_name)?
            .ok_or_else(|| Error::AccountNotFound(account_name.to_owned()))
    }

    /// Create a new account.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if the name is missing or empty, and
    /// [Error::DuplicateAccount] if the name is already taken.
    pub fn create(&mut self, form: AccountForm) -> Result<Account, Error> {
        let account_name = form
            .account_name
            .ok_or_else(|| Error::InvalidInput("Missing required account fields".to_owned()))?;

        if account_name.is_empty() {
            return Err(Error::InvalidInput(
                "Account name must not be empty".to_owned(),
            ));
        }

        if self.store.get(&account_name)?.is_some() {
            return Err(Error::DuplicateAccount(account_name));
        }

        self.store.insert(Account { account_name })
    }

    /// Rename the account named `account_name`.
    ///
    /// Returns `None` when no account matched `account_name`; a lookup miss
    /// on update is an absent result, not an error.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if the new name is missing.
    pub fn update(
        &mut self,
        account_name: &str,
        form: AccountForm,
    ) -> Result<Option<Account>, Error> {
        let new_name = form
            .account_name
            .ok_or_else(|| Error::InvalidInput("Missing required account fields".to_owned()))?;

        self.store.update(
            account_name,
            Account {
                account_name: new_name,
            },
        )
    }

    /// Delete the account named `account_name`. Returns whether a row was
    /// removed.
    pub fn delete(&mut self, account_name: &str) -> Result<bool, Error> {
        self.store.delete(account_name)
    }

    /// Remove every account. Idempotent.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.store.clear()
    }
}

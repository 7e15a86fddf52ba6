//! Defines the account store trait.

use crate::{Error, account::Account};

/// A durable table of accounts keyed by account name.
///
/// Implementers must enforce uniqueness of the account name as the primary
/// key: a lost create race must surface as [Error::DuplicateAccount] from
/// [AccountStore::insert].
pub trait AccountStore {
    /// Retrieve all accounts, in store iteration order.
    fn get_all(&self) -> Result<Vec<Account>, Error>;

    /// Retrieve the account named `account_name`, or `None` if absent.
    fn get(&self, account_name: &str) -> Result<Option<Account>, Error>;

    /// Insert a new account.
    ///
    /// # Errors
    /// Returns [Error::DuplicateAccount] if an account with the same name
    /// already exists.
    fn insert(&mut self, account: Account) -> Result<Account, Error>;

    /// Update the account named `account_name`, returning the updated record
    /// or `None` if no row matched.
    fn update(&mut self, account_name: &str, account: Account)
    -> Result<Option<Account>, Error>;

    /// Delete the account named `account_name`. Returns whether a row was
    /// removed.
    fn delete(&mut self, account_name: &str) -> Result<bool, Error>;

    /// Remove every account from the store. Idempotent.
    fn clear(&mut self) -> Result<(), Error>;
}

//! Implements a SQLite backed account store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{Error, account::Account, stores::AccountStore};

/// Stores accounts in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteAccountStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteAccountStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLock)
    }
}

/// Create the table that backs [SQLiteAccountStore].
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            account_name TEXT PRIMARY KEY
        )",
        (),
    )?;

    Ok(())
}

fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        account_name: row.get(0)?,
    })
}

impl AccountStore for SQLiteAccountStore {
    fn get_all(&self) -> Result<Vec<Account>, Error> {
        self.connection()?
            .prepare("SELECT account_name FROM account")?
            .query_map([], map_row_to_account)?
            .map(|maybe_account| maybe_account.map_err(Error::from))
            .collect()
    }

    fn get(&self, account_name: &str) -> Result<Option<Account>, Error> {
        let account = self
            .connection()?
            .prepare("SELECT account_name FROM account WHERE account_name = :account_name")?
            .query_row(&[(":account_name", account_name)], map_row_to_account)
            .optional()?;

        Ok(account)
    }

    /// Insert a new account into the database.
    ///
    /// # Errors
    /// Returns [Error::DuplicateAccount] if the name is already taken. The
    /// UNIQUE constraint on the primary key is the authoritative duplicate
    /// signal when two callers race past the manager's existence check.
    fn insert(&mut self, account: Account) -> Result<Account, Error> {
        self.connection()?
            .execute(
                "INSERT INTO account (account_name) VALUES (?1)",
                params![account.account_name],
            )
            .map_err(|error| match error {
                // Code 1555 occurs when a primary key constraint failed and
                // code 2067 when a UNIQUE constraint failed.
                rusqlite::Error::SqliteFailure(error, Some(_))
                    if error.extended_code == 1555 || error.extended_code == 2067 =>
                {
                    Error::DuplicateAccount(account.account_name.clone())
                }
                error => error.into(),
            })?;

        Ok(account)
    }

    fn update(
        &mut self,
        account_name: &str,
        account: Account,
    ) -> Result<Option<Account>, Error> {
        let rows_changed = self
            .connection()?
            .execute(
                "UPDATE account SET account_name = ?1 WHERE account_name = ?2",
                params![account.account_name, account_name],
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(error, Some(_))
                    if error.extended_code == 1555 || error.extended_code == 2067 =>
                {
                    Error::DuplicateAccount(account.account_name.clone())
                }
                error => error.into(),
            })?;

        if rows_changed > 0 {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    fn delete(&mut self, account_name: &str) -> Result<bool, Error> {
        let rows_changed = self.connection()?.execute(
            "DELETE FROM account WHERE account_name = ?1",
            params![account_name],
        )?;

        Ok(rows_changed > 0)
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.connection()?.execute("DELETE FROM account", ())?;

        Ok(())
    }
}

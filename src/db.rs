//! Database initialization for the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    stores::sqlite::{create_account_table, create_transaction_table},
};

/// Create the tables for the domain models if they do not exist.
///
/// Both tables are created within a single exclusive transaction so that a
/// partially initialized database is never observed.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_account_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

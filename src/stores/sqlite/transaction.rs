//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{Error, stores::TransactionStore, transaction::StoredTransaction};

/// Stores transactions in a SQLite database.
///
/// Amounts are persisted as integer cents and dates as Unix seconds, per the
/// persisted schema. There is no foreign key to the account table:
/// referential integrity is a manager-level concern.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLock)
    }
}

/// Create the table that backs [SQLiteTransactionStore].
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            title TEXT PRIMARY KEY,
            description TEXT NOT NULL,
            amount INTEGER NOT NULL,
            from_account TEXT NOT NULL,
            to_account TEXT NOT NULL,
            date INTEGER NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row_to_transaction(row: &Row) -> Result<StoredTransaction, rusqlite::Error> {
    Ok(StoredTransaction {
        title: row.get(0)?,
        description: row.get(1)?,
        amount_cents: row.get(2)?,
        from_account: row.get(3)?,
        to_account: row.get(4)?,
        date: row.get(5)?,
    })
}

const SELECT_COLUMNS: &str =
    "SELECT title, description, amount, from_account, to_account, date FROM \"transaction\"";

impl TransactionStore for SQLiteTransactionStore {
    fn get_all(&self) -> Result<Vec<StoredTransaction>, Error> {
        self.connection()?
            .prepare(SELECT_COLUMNS)?
            .query_map([], map_row_to_transaction)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    fn get(&self, title: &str) -> Result<Option<StoredTransaction>, Error> {
        let transaction = self
            .connection()?
            .prepare(&format!("{SELECT_COLUMNS} WHERE title = :title"))?
            .query_row(&[(":title", title)], map_row_to_transaction)
            .optional()?;

        Ok(transaction)
    }

    /// Insert a new transaction into the database.
    ///
    /// # Errors
    /// Returns [Error::DuplicateTransaction] if the title is already taken.
    /// The UNIQUE constraint on the primary key is the authoritative
    /// duplicate signal when two callers race past the manager's existence
    /// check.
    fn insert(&mut self, transaction: StoredTransaction) -> Result<(), Error> {
        self.connection()?
            .execute(
                "INSERT INTO \"transaction\"
                    (title, description, amount, from_account, to_account, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    transaction.title,
                    transaction.description,
                    transaction.amount_cents,
                    transaction.from_account,
                    transaction.to_account,
                    transaction.date
                ],
            )
            .map_err(|error| match error {
                // Code 1555 occurs when a primary key constraint failed and
                // code 2067 when a UNIQUE constraint failed.
                rusqlite::Error::SqliteFailure(error, Some(_))
                    if error.extended_code == 1555 || error.extended_code == 2067 =>
                {
                    Error::DuplicateTransaction(transaction.title.clone())
                }
                error => error.into(),
            })?;

        Ok(())
    }

    /// Update every field except the title. The primary key never changes.
    fn update(&mut self, title: &str, transaction: StoredTransaction) -> Result<bool, Error> {
        let rows_changed = self.connection()?.execute(
            "UPDATE \"transaction\"
             SET description = ?1, amount = ?2, from_account = ?3, to_account = ?4, date = ?5
             WHERE title = ?6",
            params![
                transaction.description,
                transaction.amount_cents,
                transaction.from_account,
                transaction.to_account,
                transaction.date,
                title
            ],
        )?;

        Ok(rows_changed > 0)
    }

    fn delete(&mut self, title: &str) -> Result<bool, Error> {
        let rows_changed = self.connection()?.execute(
            "DELETE FROM \"transaction\" WHERE title = ?1",
            params![title],
        )?;

        Ok(rows_changed > 0)
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.connection()?.execute("DELETE FROM \"transaction\"", ())?;

        Ok(())
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, stores::TransactionStore, transaction::StoredTransaction};

    use super::{SQLiteTransactionStore, create_transaction_table};

    fn get_test_store() -> SQLiteTransactionStore {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_transaction_table(&connection).expect("Could not create transaction table");

        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    fn transaction(title: &str) -> StoredTransaction {
        StoredTransaction {
            title: title.to_owned(),
            description: "coffee".to_owned(),
            amount_cents: 450,
            from_account: "alice".to_owned(),
            to_account: "bob".to_owned(),
            date: 1705276800,
        }
    }

    #[test]
    fn create_table_sql_is_valid() {
        let connection = Connection::open_in_memory().unwrap();

        assert_eq!(Ok(()), create_transaction_table(&connection));
    }

    #[test]
    fn insert_then_get_returns_row() {
        let mut store = get_test_store();

        store.insert(transaction("t1")).unwrap();

        assert_eq!(store.get("t1").unwrap(), Some(transaction("t1")));
    }

    #[test]
    fn get_missing_title_returns_none() {
        let store = get_test_store();

        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn insert_duplicate_title_fails() {
        let mut store = get_test_store();
        store.insert(transaction("t1")).unwrap();

        let result = store.insert(transaction("t1"));

        assert_eq!(result, Err(Error::DuplicateTransaction("t1".to_owned())));
    }

    #[test]
    fn update_changes_all_fields_except_title() {
        let mut store = get_test_store();
        store.insert(transaction("t1")).unwrap();

        let replacement = StoredTransaction {
            title: "ignored".to_owned(),
            description: "lunch".to_owned(),
            amount_cents: 1250,
            from_account: "bob".to_owned(),
            to_account: "carol".to_owned(),
            date: 1705363200,
        };

        assert!(store.update("t1", replacement.clone()).unwrap());

        let got = store.get("t1").unwrap().unwrap();
        assert_eq!(got.title, "t1");
        assert_eq!(got.description, replacement.description);
        assert_eq!(got.amount_cents, replacement.amount_cents);
        assert_eq!(got.from_account, replacement.from_account);
        assert_eq!(got.to_account, replacement.to_account);
        assert_eq!(got.date, replacement.date);
    }

    #[test]
    fn update_missing_title_returns_false() {
        let mut store = get_test_store();

        assert!(!store.update("nothing", transaction("nothing")).unwrap());
    }

    #[test]
    fn delete_returns_whether_row_was_removed() {
        let mut store = get_test_store();
        store.insert(transaction("t1")).unwrap();

        assert!(store.delete("t1").unwrap());
        assert!(!store.delete("t1").unwrap());
    }

    #[test]
    fn clear_empties_the_table() {
        let mut store = get_test_store();
        store.insert(transaction("t1")).unwrap();
        store.insert(transaction("t2")).unwrap();

        store.clear().unwrap();

        assert_eq!(store.get_all().unwrap(), vec![]);
    }
}

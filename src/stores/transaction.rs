//! Defines the transaction store trait.

use crate::{Error, transaction::StoredTransaction};

/// A durable table of transactions keyed by title.
///
/// The store deals exclusively in the persisted row shape
/// ([StoredTransaction]): integer cents and Unix-second dates. Conversion to
/// and from the wire shape happens at the manager boundary.
pub trait TransactionStore {
    /// Retrieve all transactions, in store iteration order.
    fn get_all(&self) -> Result<Vec<StoredTransaction>, Error>;

    /// Retrieve the transaction titled `title`, or `None` if absent.
    fn get(&self, title: &str) -> Result<Option<StoredTransaction>, Error>;

    /// Insert a new transaction.
    ///
    /// # Errors
    /// Returns [Error::DuplicateTransaction] if a transaction with the same
    /// title already exists.
    fn insert(&mut self, transaction: StoredTransaction) -> Result<(), Error>;

    /// Update every field except the title of the transaction titled
    /// `title`. Returns whether a row matched.
    ///
    /// The title in `transaction` is ignored; the primary key is immutable.
    fn update(&mut self, title: &str, transaction: StoredTransaction) -> Result<bool, Error>;

    /// Delete the transaction titled `title`. Returns whether a row was
    /// removed.
    fn delete(&mut self, title: &str) -> Result<bool, Error>;

    /// Remove every transaction from the store. Idempotent.
    fn clear(&mut self) -> Result<(), Error>;
}

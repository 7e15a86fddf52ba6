//! SQLite backed implementations of the store traits.

mod account;
mod transaction;

pub use account::{SQLiteAccountStore, create_account_table};
pub use transaction::{SQLiteTransactionStore, create_transaction_table};

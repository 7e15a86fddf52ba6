//! Transaction management: the models, validation, date normalization, bulk
//! ingestion and JSON endpoints.

mod core;
pub mod date;
mod endpoints;
mod manager;

pub use core::{StoredTransaction, Transaction, TransactionForm, ValidatedTransaction};
pub use endpoints::{
    bulk_create_transactions_endpoint, create_transaction_endpoint, delete_transaction_endpoint,
    get_transaction_endpoint, list_transactions_endpoint, update_transaction_endpoint,
};
pub use manager::TransactionManager;

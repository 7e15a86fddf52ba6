//! Contains traits and implementations for objects that store the domain
//! models.

mod account;
mod transaction;

pub mod sqlite;

pub use account::AccountStore;
pub use transaction::TransactionStore;

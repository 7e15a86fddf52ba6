//! The account model and the boundary type for account payloads.
use serde::{Deserialize, Serialize};

/// A named party that can send or receive funds in a transaction.
///
/// Accounts have no balance concept in this system; their state is simply
/// whether they exist in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The name of the account. Unique and used as the primary key.
    pub account_name: String,
}

/// The request payload for creating or updating an account.
///
/// All fields are optional so that missing fields can be reported as
/// validation errors instead of deserialization failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountForm {
    /// The name of the account.
    pub account_name: Option<String>,
}

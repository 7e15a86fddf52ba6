//! The transaction models: the wire representation, the unvalidated request
//! payload, the validated form, and the persisted row shape.
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    transaction::date::{date_to_string, date_to_unix_seconds, unix_seconds_to_date},
};

/// A record of a transfer between two accounts, as sent to and from clients.
///
/// This is the caller-shaped view: `amount` is a decimal number of dollars
/// and `transaction_date` is an ISO-8601 calendar date string (`YYYY-MM-DD`).
/// The persisted row uses integer cents and Unix seconds, see
/// [StoredTransaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The unique title of the transaction. Used as the primary key.
    pub title: String,
    /// A free-text description of what the transfer was for.
    pub description: String,
    /// The amount transferred, in dollars. Never negative.
    pub amount: f64,
    /// The name of the account the money came from.
    pub from_account: String,
    /// The name of the account the money went to.
    pub to_account: String,
    /// The date of the transfer as a `YYYY-MM-DD` string.
    pub transaction_date: String,
}

/// The request payload for creating or updating a transaction.
///
/// All fields are optional so that missing fields surface as a single
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    /// The unique title of the transaction.
    pub title: Option<String>,
    /// A free-text description of what the transfer was for.
    pub description: Option<String>,
    /// The amount transferred, in dollars.
    pub amount: Option<f64>,
    /// The name of the account the money came from.
    pub from_account: Option<String>,
    /// The name of the account the money went to.
    pub to_account: Option<String>,
    /// The date of the transfer as a `YYYY-MM-DD` string.
    pub transaction_date: Option<String>,
}

/// A transaction payload that has passed structural and semantic validation.
///
/// Managers construct this from a [TransactionForm] so that the rest of the
/// code operates on already-valid input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    /// The unique title of the transaction.
    pub title: String,
    /// A free-text description of what the transfer was for.
    pub description: String,
    /// The amount transferred, in dollars. Validated to be `>= 0`.
    pub amount: f64,
    /// The name of the account the money came from.
    pub from_account: String,
    /// The name of the account the money went to. Differs from
    /// `from_account`.
    pub to_account: String,
    /// The parsed calendar date of the transfer.
    pub date: Date,
}

impl ValidatedTransaction {
    /// Convert into the persisted row shape, scaling the amount to integer
    /// cents and the date to Unix seconds at UTC midnight.
    pub fn to_stored(&self) -> StoredTransaction {
        StoredTransaction {
            title: self.title.clone(),
            description: self.description.clone(),
            amount_cents: (self.amount * 100.0).round() as i64,
            from_account: self.from_account.clone(),
            to_account: self.to_account.clone(),
            date: date_to_unix_seconds(self.date),
        }
    }

    /// Convert into the wire representation, mirroring the caller's input
    /// rather than the scaled/stored form.
    pub fn into_response(self) -> Result<Transaction, Error> {
        Ok(Transaction {
            transaction_date: date_to_string(self.date)?,
            title: self.title,
            description: self.description,
            amount: self.amount,
            from_account: self.from_account,
            to_account: self.to_account,
        })
    }
}

/// A transaction as persisted by the store: the amount scaled to integer
/// cents to avoid floating-point drift, and the date as Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTransaction {
    /// The unique title of the transaction. Used as the primary key.
    pub title: String,
    /// A free-text description of what the transfer was for.
    pub description: String,
    /// The amount transferred, in cents.
    pub amount_cents: i64,
    /// The name of the account the money came from.
    pub from_account: String,
    /// The name of the account the money went to.
    pub to_account: String,
    /// The date of the transfer as Unix seconds at UTC midnight.
    pub date: i64,
}

impl StoredTransaction {
    /// Convert the persisted row back into the wire representation,
    /// rendering the stored timestamp as a UTC calendar date string.
    pub fn into_response(self) -> Result<Transaction, Error> {
        let date = unix_seconds_to_date(self.date)?;

        Ok(Transaction {
            transaction_date: date_to_string(date)?,
            title: self.title,
            description: self.description,
            amount: self.amount_cents as f64 / 100.0,
            from_account: self.from_account,
            to_account: self.to_account,
        })
    }
}

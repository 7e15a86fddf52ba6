//! Enforces transaction invariants atop a [TransactionStore] and
//! orchestrates bulk ingestion.

use crate::{
    Error,
    account::{AccountForm, AccountManager},
    stores::{AccountStore, TransactionStore},
    transaction::{
        StoredTransaction, Transaction, TransactionForm, ValidatedTransaction, date::parse_date,
    },
};

/// Validates transaction payloads, converts between the wire and stored
/// representations, and delegates persistence to the store.
///
/// The account manager is consulted only during bulk ingestion, to
/// auto-provision referenced accounts. Single create and update deliberately
/// skip the account existence check: a caller may create a transaction
/// referencing accounts that do not exist.
#[derive(Debug, Clone)]
pub struct TransactionManager<T, A>
where
    T: TransactionStore,
    A: AccountStore,
{
    store: T,
    account_manager: AccountManager<A>,
}

impl<T, A> TransactionManager<T, A>
where
    T: TransactionStore,
    A: AccountStore,
{
    /// Create a manager backed by `store`, using `account_manager` to
    /// auto-provision accounts during bulk ingestion.
    pub fn new(store: T, account_manager: AccountManager<A>) -> Self {
        Self {
            store,
            account_manager,
        }
    }

    /// Retrieve all transactions with dates rendered as `YYYY-MM-DD`
    /// strings.
    pub fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.store
            .get_all()?
            .into_iter()
            .map(StoredTransaction::into_response)
            .collect()
    }

    /// Retrieve the transaction titled `title`, or `None` if absent.
    pub fn get(&self, title: &str) -> Result<Option<Transaction>, Error> {
        self.store
            .get(title)?
            .map(StoredTransaction::into_response)
            .transpose()
    }

    /// Create a new transaction.
    ///
    /// The returned record mirrors the caller's input (decimal amount and
    /// ISO date string), not the scaled/stored row.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if the date is malformed, a required
    /// field is missing, the amount is negative, or the from and to accounts
    /// are the same. Returns [Error::DuplicateTransaction] if the title is
    /// already taken.
    pub fn create(&mut self, form: TransactionForm) -> Result<Transaction, Error> {
        let validated = validate(form)?;

        if self.store.get(&validated.title)?.is_some() {
            return Err(Error::DuplicateTransaction(validated.title));
        }

        self.store.insert(validated.to_stored())?;

        validated.into_response()
    }

    /// Update every field except the title of the transaction titled
    /// `title`.
    ///
    /// Returns `None` when no transaction matched `title`; a lookup miss on
    /// update is an absent result, not an error. No duplicate check is
    /// performed since the primary key never changes.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] under the same conditions as
    /// [TransactionManager::create].
    pub fn update(
        &mut self,
        title: &str,
        form: TransactionForm,
    ) -> Result<Option<Transaction>, Error> {
        let validated = validate(form)?;

        if self.store.update(title, validated.to_stored())? {
            validated.into_response().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Delete the transaction titled `title`. Returns whether a row was
    /// removed.
    pub fn delete(&mut self, title: &str) -> Result<bool, Error> {
        self.store.delete(title)
    }

    /// Remove every transaction. Idempotent.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.store.clear()
    }

    /// Create many transactions, auto-provisioning any referenced accounts
    /// that do not exist yet.
    ///
    /// Inputs are processed strictly in order, one at a time, so that an
    /// account created for one input is visible to the next. Each input is
    /// deserialized individually and gets the same validation as
    /// [TransactionManager::create]. A failure for one input, including a
    /// wrongly-typed field that fails deserialization, is logged and that
    /// input is skipped; processing continues with the rest. Accounts
    /// auto-created for an input that later fails validation are not rolled
    /// back.
    ///
    /// Returns the successfully created transactions in input order,
    /// possibly fewer than the inputs.
    pub fn bulk_create(&mut self, inputs: Vec<serde_json::Value>) -> Vec<Transaction> {
        let mut created = Vec::new();

        for input in inputs {
            let result = serde_json::from_value::<TransactionForm>(input)
                .map_err(|error| {
                    Error::InvalidInput(format!("Invalid transaction payload: {error}"))
                })
                .and_then(|form| self.create_with_accounts(form));

            match result {
                Ok(transaction) => created.push(transaction),
                Err(error) => {
                    tracing::warn!("Failed to create transaction: {error}");
                    continue;
                }
            }
        }

        created
    }

    fn create_with_accounts(&mut self, form: TransactionForm) -> Result<Transaction, Error> {
        if let Some(from_account) = &form.from_account {
            self.ensure_account(from_account)?;
        }

        if let Some(to_account) = &form.to_account {
            self.ensure_account(to_account)?;
        }

        self.create(form)
    }

    fn ensure_account(&mut self, account_name: &str) -> Result<(), Error> {
        match self.account_manager.get(account_name) {
            Ok(_) => Ok(()),
            Err(Error::AccountNotFound(_)) => {
                self.account_manager.create(AccountForm {
                    account_name: Some(account_name.to_owned()),
                })?;
                Ok(())
            }
            Err(error) => Err(error),
        }
    }
}

/// Check the structural and semantic invariants of a transaction payload.
///
/// The checks run in a fixed order: date parse, field presence, amount
/// range, then distinct accounts.
fn validate(form: TransactionForm) -> Result<ValidatedTransaction, Error> {
    // A malformed date is fatal before any other validation.
    let date = form.transaction_date.as_deref().map(parse_date).transpose()?;

    let (
        Some(title),
        Some(description),
        Some(amount),
        Some(from_account),
        Some(to_account),
        Some(date),
    ) = (
        form.title,
        form.description,
        form.amount,
        form.from_account,
        form.to_account,
        date,
    )
    else {
        return Err(Error::InvalidInput(
            "Missing required transaction fields".to_owned(),
        ));
    };

    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidInput(
            "Amount must be a positive number".to_owned(),
        ));
    }

    if from_account == to_account {
        return Err(Error::InvalidInput(
            "From and to accounts cannot be the same".to_owned(),
        ));
    }

    Ok(ValidatedTransaction {
        title,
        description,
        amount,
        from_account,
        to_account,
        date,
    })
}

//! The JSON endpoints for managing transactions.
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    Error,
    state::TransactionState,
    stores::{AccountStore, TransactionStore},
    transaction::{Transaction, TransactionForm},
};

/// List every transaction, with dates rendered as `YYYY-MM-DD` strings.
pub async fn list_transactions_endpoint<T, A>(
    State(state): State<TransactionState<T, A>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
    A: AccountStore + Clone + Send + Sync + 'static,
{
    state.transaction_manager.list().map(Json)
}

/// Get a single transaction by title, or 404 if absent.
pub async fn get_transaction_endpoint<T, A>(
    State(state): State<TransactionState<T, A>>,
    Path(title): Path<String>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
    A: AccountStore + Clone + Send + Sync + 'static,
{
    match state.transaction_manager.get(&title)? {
        Some(transaction) => Ok(Json(transaction)),
        None => Err(Error::TransactionNotFound(title)),
    }
}

/// Create a new transaction from a JSON body.
///
/// The referenced accounts are deliberately not checked for existence here;
/// only bulk ingestion provisions accounts.
pub async fn create_transaction_endpoint<T, A>(
    State(state): State<TransactionState<T, A>>,
    Json(form): Json<TransactionForm>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
    A: AccountStore + Clone + Send + Sync + 'static,
{
    let mut manager = state.transaction_manager;
    let transaction = manager.create(form)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Update a transaction by title, or 404 if no transaction matched.
pub async fn update_transaction_endpoint<T, A>(
    State(state): State<TransactionState<T, A>>,
    Path(title): Path<String>,
    Json(form): Json<TransactionForm>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
    A: AccountStore + Clone + Send + Sync + 'static,
{
    let mut manager = state.transaction_manager;

    match manager.update(&title, form)? {
        Some(transaction) => Ok(Json(transaction)),
        None => Err(Error::TransactionNotFound(title)),
    }
}

/// Delete a transaction by title, or 404 if no transaction matched.
pub async fn delete_transaction_endpoint<T, A>(
    State(state): State<TransactionState<T, A>>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
    A: AccountStore + Clone + Send + Sync + 'static,
{
    let mut manager = state.transaction_manager;

    if manager.delete(&title)? {
        Ok(Json(
            json!({ "message": "Transaction deleted successfully" }),
        ))
    } else {
        Err(Error::TransactionNotFound(title))
    }
}

/// Create many transactions at once, auto-provisioning referenced accounts.
///
/// The body must be a JSON array; anything else is rejected by the extractor
/// before any processing. Elements are deserialized one at a time inside the
/// manager so that a single malformed or invalid element is skipped rather
/// than failing the whole batch; the response contains only the transactions
/// that were created.
pub async fn bulk_create_transactions_endpoint<T, A>(
    State(state): State<TransactionState<T, A>>,
    Json(inputs): Json<Vec<serde_json::Value>>,
) -> impl IntoResponse
where
    T: TransactionStore + Clone + Send + Sync + 'static,
    A: AccountStore + Clone + Send + Sync + 'static,
{
    let mut manager = state.transaction_manager;
    let created = manager.bulk_create(inputs);

    (StatusCode::CREATED, Json(created))
}

#[cfg(test)]
mod transaction_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        http::StatusCode,
        routing::{delete, get, post, put},
    };
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        account::AccountManager,
        db::initialize,
        endpoints,
        state::TransactionState,
        stores::sqlite::{SQLiteAccountStore, SQLiteTransactionStore},
        transaction::{Transaction, TransactionManager},
    };

    use super::{
        bulk_create_transactions_endpoint, create_transaction_endpoint,
        delete_transaction_endpoint, get_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");
        let connection = Arc::new(Mutex::new(connection));

        let state = TransactionState {
            transaction_manager: TransactionManager::new(
                SQLiteTransactionStore::new(connection.clone()),
                AccountManager::new(SQLiteAccountStore::new(connection)),
            ),
        };

        let app = Router::new()
            .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint))
            .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint))
            .route(
                endpoints::TRANSACTIONS_BULK,
                post(bulk_create_transactions_endpoint),
            )
            .route(endpoints::TRANSACTION, get(get_transaction_endpoint))
            .route(endpoints::TRANSACTION, put(update_transaction_endpoint))
            .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    fn coffee_json(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "description": "coffee",
            "amount": 4.5,
            "fromAccount": "alice",
            "toAccount": "bob",
            "transactionDate": "2024-01-15",
        })
    }

    #[tokio::test]
    async fn create_transaction_echoes_the_input() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&coffee_json("t1"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let transaction: Transaction = response.json();
        assert_eq!(transaction.amount, 4.5);
        assert_eq!(transaction.transaction_date, "2024-01-15");
    }

    #[tokio::test]
    async fn create_transaction_with_equal_accounts_returns_bad_request() {
        let server = get_test_server();
        let mut body = coffee_json("t1");
        body["toAccount"] = json!("alice");

        let response = server.post(endpoints::TRANSACTIONS).json(&body).await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn create_duplicate_transaction_returns_conflict() {
        let server = get_test_server();
        server
            .post(endpoints::TRANSACTIONS)
            .json(&coffee_json("t1"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&coffee_json("t1"))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn list_renders_date_strings() {
        let server = get_test_server();
        server
            .post(endpoints::TRANSACTIONS)
            .json(&coffee_json("t1"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get(endpoints::TRANSACTIONS).await;

        let transactions: Vec<Transaction> = response.json();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction_date, "2024-01-15");
        assert_eq!(transactions[0].amount, 4.5);
    }

    #[tokio::test]
    async fn update_missing_transaction_returns_not_found() {
        let server = get_test_server();

        let response = server
            .put("/transactions/nothing")
            .json(&coffee_json("nothing"))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_transaction_then_get_returns_not_found() {
        let server = get_test_server();
        server
            .post(endpoints::TRANSACTIONS)
            .json(&coffee_json("t1"))
            .await
            .assert_status(StatusCode::CREATED);

        server.delete("/transactions/t1").await.assert_status_ok();
        server
            .get("/transactions/t1")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn bulk_create_returns_only_created_transactions() {
        let server = get_test_server();
        let mut invalid = coffee_json("bad");
        invalid["amount"] = json!(-1.0);

        let response = server
            .post(endpoints::TRANSACTIONS_BULK)
            .json(&json!([coffee_json("good"), invalid]))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: Vec<Transaction> = response.json();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "good");
    }

    #[tokio::test]
    async fn bulk_create_skips_wrongly_typed_elements() {
        let server = get_test_server();
        let mut mistyped = coffee_json("bad");
        mistyped["amount"] = json!("4.5");

        let response = server
            .post(endpoints::TRANSACTIONS_BULK)
            .json(&json!([coffee_json("good"), mistyped]))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: Vec<Transaction> = response.json();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "good");

        let transactions: Vec<Transaction> = server.get(endpoints::TRANSACTIONS).await.json();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].title, "good");
    }

    #[tokio::test]
    async fn bulk_create_rejects_non_array_bodies() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_BULK)
            .json(&coffee_json("t1"))
            .await;

        assert!(
            response.status_code().is_client_error(),
            "want client error for non-array body, got {}",
            response.status_code()
        );
    }
}

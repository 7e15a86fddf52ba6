//! Application router configuration.

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error, endpoints,
    account::{
        create_account_endpoint, delete_account_endpoint, get_account_endpoint,
        list_accounts_endpoint, update_account_endpoint,
    },
    stores::{AccountStore, TransactionStore},
    transaction::{
        bulk_create_transactions_endpoint, create_transaction_endpoint,
        delete_transaction_endpoint, get_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<A, T>(state: AppState<A, T>) -> Router
where
    A: AccountStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::ACCOUNTS,
            get(list_accounts_endpoint).post(create_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT,
            get(get_account_endpoint)
                .put(update_account_endpoint)
                .delete(delete_account_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_BULK,
            post(bulk_create_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(endpoints::RESET, delete(reset_endpoint))
        .route(endpoints::HELLO, get(get_hello))
        .with_state(state)
}

/// Health check endpoint.
async fn get_hello() -> Json<Value> {
    Json(json!({ "message": "Hello, World!" }))
}

/// Clear both stores. Failures here propagate as a server-side error.
async fn reset_endpoint<A, T>(State(state): State<AppState<A, T>>) -> Result<Json<Value>, Error>
where
    A: AccountStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let mut transaction_manager = state.transaction_manager;
    let mut account_manager = state.account_manager;

    transaction_manager.reset()?;
    account_manager.reset()?;

    Ok(Json(
        json!({ "message": "All data has been reset successfully" }),
    ))
}

#[cfg(test)]
mod router_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, endpoints,
        account::Account,
        db::initialize,
        stores::sqlite::{SQLiteAccountStore, SQLiteTransactionStore},
        transaction::Transaction,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");
        let connection = Arc::new(Mutex::new(connection));

        let state = AppState::new(
            SQLiteAccountStore::new(connection.clone()),
            SQLiteTransactionStore::new(connection),
        );

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn hello_returns_greeting() {
        let server = get_test_server();

        let response = server.get(endpoints::HELLO).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Hello, World!" }));
    }

    #[tokio::test]
    async fn single_create_succeeds_without_existing_accounts() {
        // Neither "alice" nor "bob" was created first: the non-bulk path
        // performs no account existence check.
        let server = get_test_server();

        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "title": "t1",
                "description": "coffee",
                "amount": 4.5,
                "fromAccount": "alice",
                "toAccount": "bob",
                "transactionDate": "2024-01-15",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let transactions: Vec<Transaction> = server.get(endpoints::TRANSACTIONS).await.json();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction_date, "2024-01-15");
        assert_eq!(transactions[0].amount, 4.5);

        // No accounts were provisioned along the way.
        let accounts: Vec<Account> = server.get(endpoints::ACCOUNTS).await.json();
        assert_eq!(accounts, vec![]);
    }

    #[tokio::test]
    async fn bulk_create_provisions_accounts_across_inputs() {
        let server = get_test_server();

        let body = json!([
            {
                "title": "a",
                "description": "first",
                "amount": 1.0,
                "fromAccount": "x",
                "toAccount": "y",
                "transactionDate": "2024-01-01",
            },
            {
                "title": "b",
                "description": "second",
                "amount": 2.0,
                "fromAccount": "x",
                "toAccount": "z",
                "transactionDate": "2024-01-02",
            },
        ]);

        let response = server.post(endpoints::TRANSACTIONS_BULK).json(&body).await;

        response.assert_status(StatusCode::CREATED);
        let created: Vec<Transaction> = response.json();
        assert_eq!(created.len(), 2);

        for name in ["x", "y", "z"] {
            server
                .get(&format!("/accounts/{name}"))
                .await
                .assert_status_ok();
        }
    }

    #[tokio::test]
    async fn reset_clears_both_stores() {
        let server = get_test_server();
        server
            .post(endpoints::ACCOUNTS)
            .json(&json!({ "account_name": "alice" }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "title": "t1",
                "description": "coffee",
                "amount": 4.5,
                "fromAccount": "alice",
                "toAccount": "bob",
                "transactionDate": "2024-01-15",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        server.delete(endpoints::RESET).await.assert_status_ok();

        let accounts: Vec<Account> = server.get(endpoints::ACCOUNTS).await.json();
        assert_eq!(accounts, vec![]);
        let transactions: Vec<Transaction> = server.get(endpoints::TRANSACTIONS).await.json();
        assert_eq!(transactions, vec![]);
    }
}

//! Defines the app level error type and its conversion to JSON responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client sent a payload with missing, malformed or out-of-range
    /// fields. The message describes the offending field.
    #[error("{0}")]
    InvalidInput(String),

    /// No account exists with the given name.
    #[error("Account with name '{0}' not found")]
    AccountNotFound(String),

    /// No transaction exists with the given title.
    #[error("Transaction with title '{0}' not found")]
    TransactionNotFound(String),

    /// The specified account name already exists in the database.
    ///
    /// This is also how the store reports a lost create race: when two
    /// callers pass the existence check and both insert, the UNIQUE
    /// constraint on the primary key produces this error for the loser.
    #[error("Account with name '{0}' already exists")]
    DuplicateAccount(String),

    /// The specified transaction title already exists in the database.
    #[error("Transaction with title '{0}' already exists")]
    DuplicateTransaction(String),

    /// A stored Unix timestamp could not be converted back to a calendar
    /// date, or a date could not be formatted.
    ///
    /// This indicates corrupt data or a bug, not a client error.
    #[error("could not convert a stored transaction date: {0}")]
    DateConversion(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        // UNIQUE constraint violations are mapped to the Duplicate* variants
        // at the store boundary where the offending name is known.
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::AccountNotFound(_) | Error::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateAccount(_) | Error::DuplicateTransaction(_) => StatusCode::CONFLICT,
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An unexpected error occurred" })),
                )
                    .into_response();
            }
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let response =
            Error::InvalidInput("Missing required transaction fields".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lookup_misses_map_to_not_found() {
        let response = Error::AccountNotFound("alice".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = Error::TransactionNotFound("t1".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicates_map_to_conflict() {
        let response = Error::DuplicateAccount("alice".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = Error::DuplicateTransaction("t1".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unexpected_errors_map_to_internal_server_error() {
        let response = Error::DatabaseLock.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

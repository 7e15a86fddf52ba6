//! Ledgerbook is a small record-keeping service for financial transactions
//! between named accounts, exposed over HTTP as JSON.
//!
//! The library provides the validation and consistency logic for the account
//! and transaction lifecycle (field validation, duplicate detection, date
//! normalization and bulk ingestion with account auto-provisioning), the
//! SQLite stores that persist them, and the axum router that serves them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod account;
pub mod db;
pub mod endpoints;
mod error;
mod routing;
mod state;
pub mod stores;
pub mod transaction;

pub use error::Error;
pub use routing::build_router;
pub use state::{AccountState, AppState, TransactionState};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

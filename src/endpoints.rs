//! The API endpoint URIs.

/// The route to list and create accounts.
pub const ACCOUNTS: &str = "/accounts";
/// The route to access a single account by name.
pub const ACCOUNT: &str = "/accounts/{account_name}";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to access a single transaction by title.
pub const TRANSACTION: &str = "/transactions/{title}";
/// The route to create many transactions at once, auto-provisioning any
/// referenced accounts.
pub const TRANSACTIONS_BULK: &str = "/transactions/bulk";
/// The route to clear both stores.
pub const RESET: &str = "/reset";
/// The health check route.
pub const HELLO: &str = "/hello";

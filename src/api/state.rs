//! Application state shared across all handlers.

use sea_orm::DatabaseConnection;

/// State handed to every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub database: DatabaseConnection,
}

impl AppState {
    /// Creates the state around an open connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

//! Application state shared across Axum route handlers.
//!
//! Holds the process-wide database connection, initialized at startup and
//! passed into handlers via Axum's `State<T>` extractor.

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Shared reference to the connection, for handlers that only query.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Cloned connection, for contexts that need ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}

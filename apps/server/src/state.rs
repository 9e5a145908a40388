//! # Shared Application State
//!
//! The `Database` handle is constructed once at startup and cloned into
//! every handler through axum state - no ambient global client.

use salespro_db::Database;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    /// Creates the shared state from an initialized database handle.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

//! Shared application state.

use tienda_db::Database;

/// State handed to every handler. `Database` is a cloneable pool handle, so
/// cloning the state per request is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

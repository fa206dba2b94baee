//! # Store Errors
//!
//! `DbError` classifies what SQLite reported. The service layer turns
//! UNIQUE violations into `Duplicate`; the REST layer maps the rest to a
//! status code.
//!
//! ```text
//! SQLite message                                   DbError
//! ───────────────────────────────────────────────  ─────────────────────────
//! UNIQUE constraint failed: customers.email        UniqueViolation{field:"email"}
//! FOREIGN KEY constraint failed                    ForeignKeyViolation
//! CHECK constraint failed: ...                     CheckViolation
//! (anything else)                                  QueryFailed
//! pool timeout / pool closed                       PoolExhausted / ConnectionFailed
//! ```

use thiserror::Error;

/// Failures from the store.
#[derive(Debug, Error)]
pub enum DbError {
    /// `update` or `delete` matched no row, or an update target is missing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// PRIMARY KEY or UNIQUE column collision. `field` is the column SQLite
    /// named; SQLite does not report the value, so callers fill it in.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// An invoice reference vanished between lookup and insert.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation (a row that bypassed field validation).
    #[error("Check constraint failed: {message}")]
    CheckViolation { message: String },

    /// The file could not be opened, or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// `NotFound` for a record kind and key.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if let Some(target) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: unique_column(target).to_string(),
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::CheckViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// "customers.email" → "email". Composite targets keep their first column.
fn unique_column(target: &str) -> &str {
    let first = target.split(',').next().unwrap_or(target).trim();
    first.rsplit('.').next().unwrap_or(first)
}

/// Result alias for store operations.
pub type DbResult<T> = Result<T, DbError>;

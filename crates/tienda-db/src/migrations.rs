//! # Schema Migrations
//!
//! The files in `migrations/sqlite/` are compiled into the binary and
//! applied in sequence order when a [`crate::Database`] opens. Applied
//! versions are recorded in `_sqlx_migrations`, so reopening an existing
//! store is a no-op.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_initial_schema.sql   customers, workers, products,
//!                              payment_methods, invoices (+ cascades)
//! ```
//!
//! Schema changes go in a new `NNN_description.sql`; applied files are
//! checksummed and must stay untouched.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Everything under the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies the migrations not yet recorded in the store.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;

    info!(known = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

//! # Invoice Repository
//!
//! Database operations for invoices.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  service::create_invoice                                               │
//! │       │  resolves references, computes InvoiceTotals                   │
//! │       ▼                                                                 │
//! │  InvoiceRepository::insert(&InvoiceDraft)                              │
//! │       │  single INSERT; id from last_insert_rowid                      │
//! │       ▼                                                                 │
//! │  Invoice (immutable: there is no update)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  delete(id) or cascade from a referenced customer/worker/product/...   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tienda_core::{Invoice, InvoiceDraft};

const COLUMNS: &str = r#"
    id, customer_id, worker_id, product_id, payment_method_id,
    quantity, subtotal_cents, tax_cents, total_cents, created_at
"#;

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Lists all invoices, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {COLUMNS} FROM invoices ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = invoices.len(), "Listed invoices");
        Ok(invoices)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Persists a resolved draft and returns the stored invoice.
    ///
    /// The id is assigned by SQLite and `created_at` is stamped here.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - a reference was deleted after
    ///   it was resolved
    pub async fn insert(&self, draft: &InvoiceDraft) -> DbResult<Invoice> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO invoices (
                customer_id, worker_id, product_id, payment_method_id,
                quantity, subtotal_cents, tax_cents, total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&draft.customer_id)
        .bind(&draft.worker_id)
        .bind(&draft.product_id)
        .bind(&draft.payment_method_id)
        .bind(draft.quantity)
        .bind(draft.totals.subtotal.cents())
        .bind(draft.totals.tax.cents())
        .bind(draft.totals.total.cents())
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, total = %draft.totals.total, "Inserted invoice");

        Ok(Invoice {
            id,
            customer_id: draft.customer_id.clone(),
            worker_id: draft.worker_id.clone(),
            product_id: draft.product_id.clone(),
            payment_method_id: draft.payment_method_id.clone(),
            quantity: draft.quantity,
            subtotal_cents: draft.totals.subtotal.cents(),
            tax_cents: draft.totals.tax.cents(),
            total_cents: draft.totals.total.cents(),
            created_at,
        })
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting invoice");

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("invoice", id.to_string()));
        }

        Ok(())
    }

    /// Counts invoices (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use tienda_core::{InvoiceTotals, Money};

    fn draft() -> InvoiceDraft {
        InvoiceDraft {
            customer_id: "1712345678".to_string(),
            worker_id: "0102030405".to_string(),
            product_id: "P001".to_string(),
            payment_method_id: "EF".to_string(),
            quantity: 3,
            totals: InvoiceTotals::compute(Money::from_cents(1000), 3).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_dangling_references() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().invoices();

        let err = repo.insert(&draft()).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().invoices();
        assert!(matches!(repo.delete(42).await, Err(DbError::NotFound { .. })));
        assert_eq!(repo.get_by_id(42).await.unwrap(), None);
    }
}

//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - CRUD keyed by national id
//! - Existence checks used by the registration service (id, email)

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tienda_core::Customer;

const COLUMNS: &str = "national_id, first_name, last_name, email, phone, address";

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.customers();
///
/// let all = repo.list().await?;
/// let one = repo.get_by_id("1712345678").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers ordered by national id.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY national_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Gets a customer by national id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, national_id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE national_id = ?1"
        ))
        .bind(national_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn exists_by_id(&self, national_id: &str) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE national_id = ?1)")
                .bind(national_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Checks whether another customer already uses `email`.
    ///
    /// ## Arguments
    /// * `email` - Address to look up
    /// * `excluding` - National id to ignore (the record being updated)
    pub async fn exists_by_email(&self, email: &str, excluding: Option<&str>) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM customers
                WHERE email = ?1 AND (?2 IS NULL OR national_id <> ?2)
            )
            "#,
        )
        .bind(email)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await?;

        Ok(found != 0)
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - national id or email already exists
    pub async fn insert(&self, customer: &Customer) -> DbResult<Customer> {
        debug!(national_id = %customer.national_id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (
                national_id, first_name, last_name, email, phone, address
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&customer.national_id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .execute(&self.pool)
        .await?;

        Ok(customer.clone())
    }

    /// Overwrites every mutable column of an existing customer.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(national_id = %customer.national_id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                first_name = ?2,
                last_name = ?3,
                email = ?4,
                phone = ?5,
                address = ?6
            WHERE national_id = ?1
            "#,
        )
        .bind(&customer.national_id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("customer", &customer.national_id));
        }

        Ok(())
    }

    /// Deletes a customer and, by cascade, their invoices.
    pub async fn delete(&self, national_id: &str) -> DbResult<()> {
        debug!(national_id = %national_id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE national_id = ?1")
            .bind(national_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("customer", national_id));
        }

        Ok(())
    }

    /// Counts customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn ana() -> Customer {
        Customer {
            national_id: "1712345678".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Mora".to_string(),
            email: "ana@tienda.ec".to_string(),
            phone: "0991234567".to_string(),
            address: "Quito".to_string(),
        }
    }

    async fn repo() -> CustomerRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().customers()
    }

    #[tokio::test]
    async fn test_insert_get_list() {
        let repo = repo().await;
        repo.insert(&ana()).await.unwrap();

        assert_eq!(repo.get_by_id("1712345678").await.unwrap(), Some(ana()));
        assert_eq!(repo.get_by_id("0000000000").await.unwrap(), None);
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert!(repo.exists_by_id("1712345678").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_by_email_excluding_self() {
        let repo = repo().await;
        repo.insert(&ana()).await.unwrap();

        assert!(repo.exists_by_email("ana@tienda.ec", None).await.unwrap());
        assert!(!repo
            .exists_by_email("ana@tienda.ec", Some("1712345678"))
            .await
            .unwrap());
        assert!(repo
            .exists_by_email("ana@tienda.ec", Some("0102030405"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_insert_maps_to_unique_violation() {
        let repo = repo().await;
        repo.insert(&ana()).await.unwrap();

        let mut other = ana();
        other.national_id = "0102030405".to_string();
        let err = repo.insert(&other).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "email"));

        let mut same_id = ana();
        same_id.email = "otra@tienda.ec".to_string();
        let err = repo.insert(&same_id).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "national_id"));

        // Both keys taken: SQLite names only one of them
        let err = repo.insert(&ana()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = repo().await;
        assert!(matches!(
            repo.update(&ana()).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete("1712345678").await,
            Err(DbError::NotFound { .. })
        ));

        repo.insert(&ana()).await.unwrap();
        let mut changed = ana();
        changed.address = "Guayaquil".to_string();
        repo.update(&changed).await.unwrap();
        assert_eq!(
            repo.get_by_id("1712345678").await.unwrap().unwrap().address,
            "Guayaquil"
        );

        repo.delete("1712345678").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}

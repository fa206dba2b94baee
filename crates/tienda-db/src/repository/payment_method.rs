//! # Payment Method Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tienda_core::PaymentMethod;

#[derive(Debug, Clone)]
pub struct PaymentMethodRepository {
    pool: SqlitePool,
}

impl PaymentMethodRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PaymentMethodRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<PaymentMethod>> {
        let methods =
            sqlx::query_as::<_, PaymentMethod>("SELECT id, name FROM payment_methods ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(methods)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PaymentMethod>> {
        let method =
            sqlx::query_as::<_, PaymentMethod>("SELECT id, name FROM payment_methods WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(method)
    }

    pub async fn exists_by_id(&self, id: &str) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM payment_methods WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    pub async fn insert(&self, method: &PaymentMethod) -> DbResult<PaymentMethod> {
        debug!(id = %method.id, name = ?method.name, "Inserting payment method");

        sqlx::query("INSERT INTO payment_methods (id, name) VALUES (?1, ?2)")
            .bind(&method.id)
            .bind(method.name)
            .execute(&self.pool)
            .await?;

        Ok(method.clone())
    }

    pub async fn update(&self, method: &PaymentMethod) -> DbResult<()> {
        let result = sqlx::query("UPDATE payment_methods SET name = ?2 WHERE id = ?1")
            .bind(&method.id)
            .bind(method.name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("payment_method", &method.id));
        }

        Ok(())
    }

    /// Deletes a payment method and, by cascade, the invoices paid with it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting payment method");

        let result = sqlx::query("DELETE FROM payment_methods WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("payment_method", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use tienda_core::PaymentMethodKind;

    #[tokio::test]
    async fn test_insert_update_list() {
        let repo = Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .payment_methods();

        let mut method = PaymentMethod {
            id: "EF".to_string(),
            name: PaymentMethodKind::Cash,
        };
        repo.insert(&method).await.unwrap();
        assert!(repo.exists_by_id("EF").await.unwrap());

        method.name = PaymentMethodKind::Card;
        repo.update(&method).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec![method]);

        assert!(matches!(
            repo.delete("NOPE").await,
            Err(DbError::NotFound { .. })
        ));
    }
}

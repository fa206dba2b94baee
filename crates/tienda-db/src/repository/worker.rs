//! # Worker Repository
//!
//! Database operations for workers. Mirrors the customer repository; the
//! email uniqueness scope is the workers table only.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tienda_core::Worker;

const COLUMNS: &str = "national_id, first_name, last_name, phone, role, email";

#[derive(Debug, Clone)]
pub struct WorkerRepository {
    pool: SqlitePool,
}

impl WorkerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        WorkerRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Worker>> {
        let workers = sqlx::query_as::<_, Worker>(&format!(
            "SELECT {COLUMNS} FROM workers ORDER BY national_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = workers.len(), "Listed workers");
        Ok(workers)
    }

    pub async fn get_by_id(&self, national_id: &str) -> DbResult<Option<Worker>> {
        let worker = sqlx::query_as::<_, Worker>(&format!(
            "SELECT {COLUMNS} FROM workers WHERE national_id = ?1"
        ))
        .bind(national_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(worker)
    }

    pub async fn exists_by_id(&self, national_id: &str) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM workers WHERE national_id = ?1)")
                .bind(national_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Checks whether another worker already uses `email`, ignoring the
    /// worker identified by `excluding`.
    pub async fn exists_by_email(&self, email: &str, excluding: Option<&str>) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM workers
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

    pub async fn insert(&self, worker: &Worker) -> DbResult<Worker> {
        debug!(national_id = %worker.national_id, role = ?worker.role, "Inserting worker");

        sqlx::query(
            r#"
            INSERT INTO workers (
                national_id, first_name, last_name, phone, role, email
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&worker.national_id)
        .bind(&worker.first_name)
        .bind(&worker.last_name)
        .bind(&worker.phone)
        .bind(worker.role)
        .bind(&worker.email)
        .execute(&self.pool)
        .await?;

        Ok(worker.clone())
    }

    pub async fn update(&self, worker: &Worker) -> DbResult<()> {
        debug!(national_id = %worker.national_id, "Updating worker");

        let result = sqlx::query(
            r#"
            UPDATE workers SET
                first_name = ?2,
                last_name = ?3,
                phone = ?4,
                role = ?5,
                email = ?6
            WHERE national_id = ?1
            "#,
        )
        .bind(&worker.national_id)
        .bind(&worker.first_name)
        .bind(&worker.last_name)
        .bind(&worker.phone)
        .bind(worker.role)
        .bind(&worker.email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("worker", &worker.national_id));
        }

        Ok(())
    }

    /// Deletes a worker and, by cascade, the invoices they issued.
    pub async fn delete(&self, national_id: &str) -> DbResult<()> {
        debug!(national_id = %national_id, "Deleting worker");

        let result = sqlx::query("DELETE FROM workers WHERE national_id = ?1")
            .bind(national_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("worker", national_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use tienda_core::Role;

    #[tokio::test]
    async fn test_role_round_trips_through_storage() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().workers();
        let worker = Worker {
            national_id: "0102030405".to_string(),
            first_name: "Luis".to_string(),
            last_name: "Paz".to_string(),
            phone: "0987654321".to_string(),
            role: Role::Cashier,
            email: "luis@tienda.ec".to_string(),
        };
        repo.insert(&worker).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT role FROM workers")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(stored, "cashier");

        let mut promoted = worker.clone();
        promoted.role = Role::Administrator;
        repo.update(&promoted).await.unwrap();
        assert_eq!(repo.get_by_id("0102030405").await.unwrap(), Some(promoted));
    }

    #[tokio::test]
    async fn test_email_scope_is_per_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.customers()
            .insert(&tienda_core::Customer {
                national_id: "1712345678".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Mora".to_string(),
                email: "shared@tienda.ec".to_string(),
                phone: "0991234567".to_string(),
                address: "Quito".to_string(),
            })
            .await
            .unwrap();

        assert!(!db
            .workers()
            .exists_by_email("shared@tienda.ec", None)
            .await
            .unwrap());
    }
}

//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD keyed by the short business id (≤4 chars)
//!
//! Prices are stored as integer cents; `stock` is informational and is not
//! touched by invoicing.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tienda_core::Product;

const COLUMNS: &str = "id, name, description, price_cents, stock, image, category";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn exists_by_id(&self, id: &str) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - id already exists
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, stock, image, category
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.image)
        .bind(&product.category)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Updates an existing product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                stock = ?5,
                image = ?6,
                category = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.image)
        .bind(&product.category)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product and, by cascade, the invoices that sold it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn product(id: &str, category: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Producto {id}"),
            description: "Demo".to_string(),
            price_cents: 1000,
            stock: 3,
            image: None,
            category: category.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().products();

        repo.insert(&product("P001", Some("granos"))).await.unwrap();
        repo.insert(&product("P002", None)).await.unwrap();

        let mut p = repo.get_by_id("P001").await.unwrap().unwrap();
        assert_eq!(p.price_cents, 1000);

        p.image = Some("productos/p001.png".to_string());
        p.stock = -2;
        repo.update(&p).await.unwrap();
        assert_eq!(repo.get_by_id("P001").await.unwrap(), Some(p));

        assert_eq!(repo.list().await.unwrap().len(), 2);

        repo.delete("P002").await.unwrap();
        assert!(!repo.exists_by_id("P002").await.unwrap());
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_bad_rows() {
        let repo = Database::new(DbConfig::in_memory()).await.unwrap().products();
        let err = repo.insert(&product("TOOLONG", None)).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}

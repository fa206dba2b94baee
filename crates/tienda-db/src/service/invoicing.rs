//! # Invoicing Service
//!
//! Records a sale.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewInvoice { customer_id, worker_id, product_id, quantity, pm_id }    │
//! │       │                                                                 │
//! │       ├── quantity > 0 ?                  else Validation(quantity)    │
//! │       ├── customer exists ?               else NotFound(customer)      │
//! │       ├── worker exists ?                 else NotFound(worker)        │
//! │       ├── product exists ? (price)        else NotFound(product)       │
//! │       ├── payment method exists ?         else NotFound(payment_method)│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceTotals::compute(product.price, quantity)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceRepository::insert  → Invoice { id, created_at, ... }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written unless every step succeeds; the insert is the only
//! write. Stock is left unchanged.

use tracing::info;

use crate::pool::Database;
use crate::service::ServiceResult;
use tienda_core::validation::validate_quantity;
use tienda_core::{CoreError, EntityKind, Invoice, InvoiceDraft, InvoiceTotals, NewInvoice};

/// Validates, resolves references, derives totals and persists an invoice.
///
/// Not idempotent: two identical calls record two sales.
///
/// ## Example
/// ```rust,ignore
/// let invoice = create_invoice(&db, NewInvoice {
///     customer_id: "1712345678".into(),
///     worker_id: "0102030405".into(),
///     product_id: "P001".into(),
///     quantity: 3,
///     payment_method_id: "EF".into(),
/// }).await?;
/// assert_eq!(invoice.total().to_string(), "34.50");
/// ```
pub async fn create_invoice(db: &Database, new: NewInvoice) -> ServiceResult<Invoice> {
    validate_quantity(new.quantity)?;

    if !db.customers().exists_by_id(&new.customer_id).await? {
        return Err(CoreError::not_found(EntityKind::Customer, &new.customer_id).into());
    }
    if !db.workers().exists_by_id(&new.worker_id).await? {
        return Err(CoreError::not_found(EntityKind::Worker, &new.worker_id).into());
    }
    let product = db
        .products()
        .get_by_id(&new.product_id)
        .await?
        .ok_or_else(|| CoreError::not_found(EntityKind::Product, &new.product_id))?;
    if !db.payment_methods().exists_by_id(&new.payment_method_id).await? {
        return Err(CoreError::not_found(EntityKind::PaymentMethod, &new.payment_method_id).into());
    }

    let totals = InvoiceTotals::compute(product.price(), new.quantity)?;

    let draft = InvoiceDraft {
        customer_id: new.customer_id,
        worker_id: new.worker_id,
        product_id: new.product_id,
        payment_method_id: new.payment_method_id,
        quantity: new.quantity,
        totals,
    };
    let invoice = db.invoices().insert(&draft).await?;

    info!(
        invoice = %invoice.display_name(),
        customer_id = %invoice.customer_id,
        product = %product.display_name(),
        quantity = invoice.quantity,
        total = %invoice.total(),
        "Invoice created"
    );
    Ok(invoice)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{
        create_customer, create_payment_method, create_product, create_worker, ServiceError,
    };
    use crate::DbConfig;
    use tienda_core::{
        Money, NewCustomer, NewPaymentMethod, NewProduct, NewWorker, PaymentMethodKind, Role,
        ValidationError,
    };

    /// Database with one of each referenced record: product P001 at 10.00.
    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        create_customer(
            &db,
            NewCustomer {
                national_id: "1712345678".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Mora".to_string(),
                email: "ana@tienda.ec".to_string(),
                phone: "0991234567".to_string(),
                address: "Quito".to_string(),
            },
        )
        .await
        .unwrap();
        create_worker(
            &db,
            NewWorker {
                national_id: "0102030405".to_string(),
                first_name: "Luis".to_string(),
                last_name: "Paz".to_string(),
                phone: "0987654321".to_string(),
                role: Role::Cashier,
                email: "luis@tienda.ec".to_string(),
            },
        )
        .await
        .unwrap();
        create_product(
            &db,
            NewProduct {
                id: "P001".to_string(),
                name: "Arroz".to_string(),
                description: "1kg".to_string(),
                price: Money::from_cents(1000),
                stock: 5,
                image: None,
                category: None,
            },
        )
        .await
        .unwrap();
        create_payment_method(
            &db,
            NewPaymentMethod {
                id: "EF".to_string(),
                name: PaymentMethodKind::Cash,
            },
        )
        .await
        .unwrap();

        db
    }

    fn sale(quantity: i64) -> NewInvoice {
        NewInvoice {
            customer_id: "1712345678".to_string(),
            worker_id: "0102030405".to_string(),
            product_id: "P001".to_string(),
            quantity,
            payment_method_id: "EF".to_string(),
        }
    }

    fn not_found_entity(err: ServiceError) -> EntityKind {
        match err {
            ServiceError::Core(CoreError::NotFound { entity, .. }) => entity,
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_invoice_derives_totals() {
        let db = seeded().await;
        let invoice = create_invoice(&db, sale(3)).await.unwrap();

        assert_eq!(invoice.subtotal(), Money::from_cents(3000));
        assert_eq!(invoice.tax(), Money::from_cents(450));
        assert_eq!(invoice.total(), Money::from_cents(3450));

        let stored = db.invoices().get_by_id(invoice.id).await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 3450);
        assert_eq!(stored.quantity, 3);
        assert_eq!(stored.created_at, invoice.created_at);
    }

    #[tokio::test]
    async fn test_ids_increase_and_calls_are_not_idempotent() {
        let db = seeded().await;
        let first = create_invoice(&db, sale(1)).await.unwrap();
        let second = create_invoice(&db, sale(1)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(db.invoices().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_stock_is_not_decremented() {
        let db = seeded().await;
        create_invoice(&db, sale(4)).await.unwrap();

        let product = db.products().get_by_id("P001").await.unwrap().unwrap();
        assert_eq!(product.stock, 5);
    }

    #[tokio::test]
    async fn test_missing_references_in_resolution_order() {
        let db = seeded().await;

        let mut new = sale(1);
        new.product_id = "NOPE".to_string();
        new.payment_method_id = "NOPE".to_string();
        assert_eq!(
            not_found_entity(create_invoice(&db, new).await.unwrap_err()),
            EntityKind::Product
        );

        let mut new = sale(1);
        new.customer_id = "0000000000".to_string();
        new.worker_id = "0000000000".to_string();
        assert_eq!(
            not_found_entity(create_invoice(&db, new).await.unwrap_err()),
            EntityKind::Customer
        );

        let mut new = sale(1);
        new.payment_method_id = "TC".to_string();
        assert_eq!(
            not_found_entity(create_invoice(&db, new).await.unwrap_err()),
            EntityKind::PaymentMethod
        );

        assert_eq!(db.invoices().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_quantity_checked_first() {
        let db = seeded().await;
        let mut new = sale(0);
        new.customer_id = "0000000000".to_string();

        match create_invoice(&db, new).await.unwrap_err() {
            ServiceError::Core(CoreError::Validation(ValidationError::MustBePositive {
                field,
            })) => assert_eq!(field, "quantity"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(db.invoices().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleting_a_reference_cascades() {
        let db = seeded().await;
        let invoice = create_invoice(&db, sale(2)).await.unwrap();

        db.products().delete("P001").await.unwrap();

        assert_eq!(db.invoices().get_by_id(invoice.id).await.unwrap(), None);
        assert!(db.customers().exists_by_id("1712345678").await.unwrap());
    }
}

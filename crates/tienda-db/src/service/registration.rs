//! # Registration Services
//!
//! Create and update for the master records: customers, workers, products
//! and payment methods.
//!
//! Identifiers are immutable. Updates load the stored record, apply the
//! present fields, re-check them and write the whole row back.

use tracing::info;

use crate::error::DbError;
use crate::pool::Database;
use crate::service::{registration_conflict, unique_to_duplicate, ServiceResult};
use tienda_core::validation::{
    validate_customer_update, validate_new_customer, validate_new_payment_method,
    validate_new_product, validate_new_worker, validate_product_update, validate_worker_update,
};
use tienda_core::{
    Customer, CustomerUpdate, NewCustomer, NewPaymentMethod, NewProduct, NewWorker, PaymentMethod,
    PaymentMethodUpdate, Product, ProductUpdate, ValidationError, Worker, WorkerUpdate,
};

// =============================================================================
// Customers
// =============================================================================

/// Registers a customer.
///
/// ## Errors
/// - `Validation(InvalidFormat | Required | TooLong)` - bad field
/// - `Validation(Duplicate { field: "national_id" })` - id taken
/// - `Validation(Duplicate { field: "email" })` - email taken by a customer
pub async fn create_customer(db: &Database, new: NewCustomer) -> ServiceResult<Customer> {
    validate_new_customer(&new)?;

    let repo = db.customers();
    if repo.exists_by_id(&new.national_id).await? {
        return Err(ValidationError::duplicate("national_id", &new.national_id).into());
    }
    if repo.exists_by_email(&new.email, None).await? {
        return Err(ValidationError::duplicate("email", &new.email).into());
    }

    let customer = Customer::from(new);
    if let Err(err) = repo.insert(&customer).await {
        let id_taken = matches!(err, DbError::UniqueViolation { .. })
            && repo.exists_by_id(&customer.national_id).await?;
        return Err(registration_conflict(
            err,
            id_taken,
            &customer.national_id,
            &customer.email,
        ));
    }

    info!(
        national_id = %customer.national_id,
        name = %customer.display_name(),
        "Customer registered"
    );
    Ok(customer)
}

/// Applies a partial update to a customer.
///
/// ## Errors
/// - `Db(NotFound)` - no customer with that national id
/// - `Validation(Duplicate { field: "email" })` - email used by another
///   customer
pub async fn update_customer(
    db: &Database,
    national_id: &str,
    update: CustomerUpdate,
) -> ServiceResult<Customer> {
    let repo = db.customers();
    let mut customer = repo
        .get_by_id(national_id)
        .await?
        .ok_or_else(|| DbError::not_found("customer", national_id))?;

    validate_customer_update(&update)?;
    if let Some(email) = &update.email {
        if repo.exists_by_email(email, Some(national_id)).await? {
            return Err(ValidationError::duplicate("email", email).into());
        }
    }

    customer.apply(update);
    repo.update(&customer).await.map_err(|e| {
        unique_to_duplicate(e, |field| (field == "email").then_some(customer.email.as_str()))
    })?;

    info!(national_id = %national_id, "Customer updated");
    Ok(customer)
}

// =============================================================================
// Workers
// =============================================================================

/// Registers a worker. Same checks as [`create_customer`], scoped to workers.
pub async fn create_worker(db: &Database, new: NewWorker) -> ServiceResult<Worker> {
    validate_new_worker(&new)?;

    let repo = db.workers();
    if repo.exists_by_id(&new.national_id).await? {
        return Err(ValidationError::duplicate("national_id", &new.national_id).into());
    }
    if repo.exists_by_email(&new.email, None).await? {
        return Err(ValidationError::duplicate("email", &new.email).into());
    }

    let worker = Worker::from(new);
    if let Err(err) = repo.insert(&worker).await {
        let id_taken = matches!(err, DbError::UniqueViolation { .. })
            && repo.exists_by_id(&worker.national_id).await?;
        return Err(registration_conflict(
            err,
            id_taken,
            &worker.national_id,
            &worker.email,
        ));
    }

    info!(
        national_id = %worker.national_id,
        name = %worker.display_name(),
        role = ?worker.role,
        "Worker registered"
    );
    Ok(worker)
}

pub async fn update_worker(
    db: &Database,
    national_id: &str,
    update: WorkerUpdate,
) -> ServiceResult<Worker> {
    let repo = db.workers();
    let mut worker = repo
        .get_by_id(national_id)
        .await?
        .ok_or_else(|| DbError::not_found("worker", national_id))?;

    validate_worker_update(&update)?;
    if let Some(email) = &update.email {
        if repo.exists_by_email(email, Some(national_id)).await? {
            return Err(ValidationError::duplicate("email", email).into());
        }
    }

    worker.apply(update);
    repo.update(&worker).await.map_err(|e| {
        unique_to_duplicate(e, |field| (field == "email").then_some(worker.email.as_str()))
    })?;

    info!(national_id = %national_id, "Worker updated");
    Ok(worker)
}

// =============================================================================
// Products
// =============================================================================

/// Registers a product.
///
/// ## Errors
/// - `Validation(TooLong { field: "id" })` - id over 4 characters
/// - `Validation(OutOfRange { field: "price" })` - negative or too large
/// - `Validation(Duplicate { field: "id" })` - id taken
pub async fn create_product(db: &Database, new: NewProduct) -> ServiceResult<Product> {
    validate_new_product(&new)?;

    let repo = db.products();
    if repo.exists_by_id(&new.id).await? {
        return Err(ValidationError::duplicate("id", &new.id).into());
    }

    let product = Product::from(new);
    repo.insert(&product).await.map_err(|e| {
        unique_to_duplicate(e, |field| (field == "id").then_some(product.id.as_str()))
    })?;

    info!(
        id = %product.id,
        name = %product.display_name(),
        price = %product.price(),
        "Product registered"
    );
    Ok(product)
}

pub async fn update_product(
    db: &Database,
    id: &str,
    update: ProductUpdate,
) -> ServiceResult<Product> {
    let repo = db.products();
    let mut product = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| DbError::not_found("product", id))?;

    validate_product_update(&update)?;

    product.apply(update);
    repo.update(&product).await?;

    info!(id = %id, "Product updated");
    Ok(product)
}

// =============================================================================
// Payment Methods
// =============================================================================

pub async fn create_payment_method(
    db: &Database,
    new: NewPaymentMethod,
) -> ServiceResult<PaymentMethod> {
    validate_new_payment_method(&new)?;

    let repo = db.payment_methods();
    if repo.exists_by_id(&new.id).await? {
        return Err(ValidationError::duplicate("id", &new.id).into());
    }

    let method = PaymentMethod::from(new);
    repo.insert(&method).await.map_err(|e| {
        unique_to_duplicate(e, |field| (field == "id").then_some(method.id.as_str()))
    })?;

    info!(id = %method.id, name = %method.display_name(), "Payment method registered");
    Ok(method)
}

pub async fn update_payment_method(
    db: &Database,
    id: &str,
    update: PaymentMethodUpdate,
) -> ServiceResult<PaymentMethod> {
    let repo = db.payment_methods();
    let mut method = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| DbError::not_found("payment_method", id))?;

    if let Some(name) = update.name {
        method.name = name;
    }
    repo.update(&method).await?;

    Ok(method)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceError;
    use crate::DbConfig;
    use tienda_core::{CoreError, Money, PaymentMethodKind, Role};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_customer(id: &str, email: &str) -> NewCustomer {
        NewCustomer {
            national_id: id.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Mora".to_string(),
            email: email.to_string(),
            phone: "0991234567".to_string(),
            address: "Quito".to_string(),
        }
    }

    fn new_worker(id: &str, email: &str) -> NewWorker {
        NewWorker {
            national_id: id.to_string(),
            first_name: "Luis".to_string(),
            last_name: "Paz".to_string(),
            phone: "0987654321".to_string(),
            role: Role::Salesperson,
            email: email.to_string(),
        }
    }

    fn validation(err: ServiceError) -> ValidationError {
        match err {
            ServiceError::Core(CoreError::Validation(v)) => v,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_customer_duplicate_id_then_email() {
        let db = db().await;
        let created = create_customer(&db, new_customer("1111111111", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(created.national_id, "1111111111");

        let err = create_customer(&db, new_customer("1111111111", "b@x.com"))
            .await
            .unwrap_err();
        let v = validation(err);
        assert!(v.is_duplicate());
        assert_eq!(v.field(), "national_id");

        let err = create_customer(&db, new_customer("2222222222", "a@x.com"))
            .await
            .unwrap_err();
        assert_eq!(validation(err).field(), "email");

        assert_eq!(db.customers().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_customer_format_checked_before_uniqueness() {
        let db = db().await;
        create_customer(&db, new_customer("1111111111", "a@x.com"))
            .await
            .unwrap();

        // Both bad phone and taken id: the format error wins
        let mut bad = new_customer("1111111111", "a@x.com");
        bad.phone = "12345".to_string();
        let v = validation(create_customer(&db, bad).await.unwrap_err());
        assert_eq!(v.field(), "phone");
        assert!(!v.is_duplicate());

        let v = validation(
            create_customer(&db, new_customer("12345", "z@x.com"))
                .await
                .unwrap_err(),
        );
        assert_eq!(v.field(), "national_id");
        assert!(!v.is_duplicate());
    }

    #[tokio::test]
    async fn test_update_customer() {
        let db = db().await;
        create_customer(&db, new_customer("1111111111", "a@x.com"))
            .await
            .unwrap();
        create_customer(&db, new_customer("2222222222", "b@x.com"))
            .await
            .unwrap();

        // Keeping one's own email is not a duplicate
        let same = CustomerUpdate {
            email: Some("a@x.com".to_string()),
            address: Some("Cuenca".to_string()),
            ..Default::default()
        };
        let updated = update_customer(&db, "1111111111", same).await.unwrap();
        assert_eq!(updated.address, "Cuenca");

        let taken = CustomerUpdate {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        let v = validation(update_customer(&db, "1111111111", taken).await.unwrap_err());
        assert!(v.is_duplicate());

        let bad_phone = CustomerUpdate {
            phone: Some("abc".to_string()),
            ..Default::default()
        };
        let v = validation(
            update_customer(&db, "1111111111", bad_phone)
                .await
                .unwrap_err(),
        );
        assert_eq!(v.field(), "phone");

        let err = update_customer(&db, "9999999999", CustomerUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbError::NotFound { .. })));
    }

    /// Registers the same national id from eight tasks at once on a file
    /// database with a real connection pool. Returns how many succeeded and
    /// the errors of the rest.
    async fn register_concurrently(emails: Vec<String>) -> (usize, Vec<ValidationError>) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("tienda.db")).max_connections(4))
            .await
            .unwrap();

        let tasks: Vec<_> = emails
            .into_iter()
            .map(|email| {
                let db = db.clone();
                tokio::spawn(async move {
                    create_customer(&db, new_customer("1111111111", &email)).await
                })
            })
            .collect();

        let mut created = 0;
        let mut rejected = Vec::new();
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => rejected.push(validation(err)),
            }
        }

        assert_eq!(db.customers().count().await.unwrap(), 1);
        db.close().await;
        (created, rejected)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_same_id() {
        let emails = (0..8).map(|n| format!("c{n}@x.com")).collect();
        let (created, rejected) = register_concurrently(emails).await;

        assert_eq!(created, 1);
        assert_eq!(rejected.len(), 7);
        for v in rejected {
            assert_eq!(v, ValidationError::duplicate("national_id", "1111111111"));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_same_id_and_email() {
        let emails = vec!["same@x.com".to_string(); 8];
        let (created, rejected) = register_concurrently(emails).await;

        // Losers collide on both keys; the id is what gets reported
        assert_eq!(created, 1);
        for v in rejected {
            assert_eq!(v.field(), "national_id");
            assert!(v.is_duplicate());
        }
    }

    #[tokio::test]
    async fn test_same_email_allowed_across_kinds() {
        let db = db().await;
        create_customer(&db, new_customer("1111111111", "same@x.com"))
            .await
            .unwrap();
        create_worker(&db, new_worker("1111111111", "same@x.com"))
            .await
            .unwrap();

        let v = validation(
            create_worker(&db, new_worker("2222222222", "same@x.com"))
                .await
                .unwrap_err(),
        );
        assert_eq!(v.field(), "email");
    }

    #[tokio::test]
    async fn test_update_worker_role() {
        let db = db().await;
        create_worker(&db, new_worker("1111111111", "w@x.com"))
            .await
            .unwrap();

        let update = WorkerUpdate {
            role: Some(Role::Administrator),
            ..Default::default()
        };
        let worker = update_worker(&db, "1111111111", update).await.unwrap();
        assert_eq!(worker.role, Role::Administrator);
        assert_eq!(worker.email, "w@x.com");
    }

    #[tokio::test]
    async fn test_product_rules() {
        let db = db().await;
        let new = NewProduct {
            id: "P001".to_string(),
            name: "Arroz".to_string(),
            description: "1kg".to_string(),
            price: Money::from_cents(1000),
            stock: 10,
            image: None,
            category: Some("granos".to_string()),
        };
        create_product(&db, new.clone()).await.unwrap();

        let v = validation(create_product(&db, new.clone()).await.unwrap_err());
        assert_eq!(v, ValidationError::duplicate("id", "P001"));

        let mut long_id = new.clone();
        long_id.id = "P0001".to_string();
        let v = validation(create_product(&db, long_id).await.unwrap_err());
        assert_eq!(v.field(), "id");

        let mut negative = new;
        negative.id = "P002".to_string();
        negative.price = Money::from_cents(-1);
        let v = validation(create_product(&db, negative).await.unwrap_err());
        assert_eq!(v.field(), "price");

        let update = ProductUpdate {
            price: Some(Money::from_cents(1250)),
            category: Some(None),
            ..Default::default()
        };
        let product = update_product(&db, "P001", update).await.unwrap();
        assert_eq!(product.price_cents, 1250);
        assert_eq!(product.category, None);
        assert_eq!(db.products().get_by_id("P001").await.unwrap(), Some(product));
    }

    #[tokio::test]
    async fn test_payment_method_rules() {
        let db = db().await;
        let new = NewPaymentMethod {
            id: "EF".to_string(),
            name: PaymentMethodKind::Cash,
        };
        create_payment_method(&db, new.clone()).await.unwrap();
        assert!(validation(create_payment_method(&db, new).await.unwrap_err()).is_duplicate());

        let method = update_payment_method(
            &db,
            "EF",
            PaymentMethodUpdate {
                name: Some(PaymentMethodKind::Transfer),
            },
        )
        .await
        .unwrap();
        assert_eq!(method.name, PaymentMethodKind::Transfer);

        let err = update_payment_method(&db, "XX", PaymentMethodUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbError::NotFound { .. })));
    }
}

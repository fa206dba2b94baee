//! # Domain Types
//!
//! Core domain types used throughout Tienda POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Worker      │   │    Product      │       │
//! │  │  national_id PK │   │  national_id PK │   │  id (≤4) PK     │       │
//! │  │  email (unique) │   │  email (unique) │   │  price_cents    │       │
//! │  │  phone          │   │  role           │   │  stock          │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           │                     │                     │                 │
//! │           │       ┌─────────────▼───────────┐         │                 │
//! │           └──────►│        Invoice          │◄────────┘                 │
//! │                   │  id (auto-increment)    │                           │
//! │                   │  quantity               │◄──── PaymentMethod        │
//! │                   │  subtotal / tax / total │      id PK, name          │
//! │                   └─────────────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Records vs Inputs
//! Records (`Customer`, `Invoice`, ...) mirror the stored rows. Inputs
//! (`NewCustomer`, `CustomerUpdate`, ...) are what callers submit; they are
//! validated by [`crate::validation`] before they become records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::invoice::InvoiceTotals;
use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer, keyed by national id (cédula).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    /// 10 numeric digits. Immutable.
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Unique among customers.
    pub email: String,
    /// 10 numeric digits.
    pub phone: String,
    pub address: String,
}

impl Customer {
    /// "First Last", as shown on invoices.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies the present fields of an update.
    pub fn apply(&mut self, update: CustomerUpdate) {
        if let Some(v) = update.first_name {
            self.first_name = v;
        }
        if let Some(v) = update.last_name {
            self.last_name = v;
        }
        if let Some(v) = update.email {
            self.email = v;
        }
        if let Some(v) = update.phone {
            self.phone = v;
        }
        if let Some(v) = update.address {
            self.address = v;
        }
    }
}

// =============================================================================
// Worker
// =============================================================================

/// Job role of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Cashier,
    Salesperson,
}

/// A store employee, keyed by national id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Worker {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
    /// Unique among workers.
    pub email: String,
}

impl Worker {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn apply(&mut self, update: WorkerUpdate) {
        if let Some(v) = update.first_name {
            self.first_name = v;
        }
        if let Some(v) = update.last_name {
            self.last_name = v;
        }
        if let Some(v) = update.phone {
            self.phone = v;
        }
        if let Some(v) = update.role {
            self.role = v;
        }
        if let Some(v) = update.email {
            self.email = v;
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Business identifier, at most 4 characters.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in cents.
    pub price_cents: i64,
    /// Units on hand. Invoicing does not change it.
    pub stock: i64,
    /// Reference (path or URL) to a picture kept outside this service.
    pub image: Option<String>,
    /// Free-text category.
    pub category: Option<String>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(v) = update.name {
            self.name = v;
        }
        if let Some(v) = update.description {
            self.description = v;
        }
        if let Some(v) = update.price {
            self.price_cents = v.cents();
        }
        if let Some(v) = update.stock {
            self.stock = v;
        }
        // Explicit null clears the optional columns
        if let Some(v) = update.image {
            self.image = v;
        }
        if let Some(v) = update.category {
            self.category = v;
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// The accepted ways to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Cash,
    Card,
    Transfer,
}

impl PaymentMethodKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodKind::Cash => "cash",
            PaymentMethodKind::Card => "card",
            PaymentMethodKind::Transfer => "transfer",
        }
    }
}

/// A payment method offered at the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PaymentMethod {
    /// Business identifier, at most 10 characters.
    pub id: String,
    pub name: PaymentMethodKind,
}

impl PaymentMethod {
    pub fn display_name(&self) -> &'static str {
        self.name.as_str()
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// One persisted sale.
///
/// The monetary columns are derived from the product price and quantity at
/// creation time and never taken from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Invoice {
    /// Auto-incremented by the store.
    pub id: i64,
    pub customer_id: String,
    pub worker_id: String,
    pub product_id: String,
    pub payment_method_id: String,
    pub quantity: i64,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// "Invoice 12"
    pub fn display_name(&self) -> String {
        format!("Invoice {}", self.id)
    }
}

/// An invoice ready to be inserted: references resolved, totals derived.
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: String,
    pub worker_id: String,
    pub product_id: String,
    pub payment_method_id: String,
    pub quantity: i64,
    pub totals: InvoiceTotals,
}

// =============================================================================
// Inputs
// =============================================================================

/// Payload for registering a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<NewCustomer> for Customer {
    fn from(n: NewCustomer) -> Self {
        Customer {
            national_id: n.national_id,
            first_name: n.first_name,
            last_name: n.last_name,
            email: n.email,
            phone: n.phone,
            address: n.address,
        }
    }
}

/// Partial customer update. The national id is never updatable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorker {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
    pub email: String,
}

impl From<NewWorker> for Worker {
    fn from(n: NewWorker) -> Self {
        Worker {
            national_id: n.national_id,
            first_name: n.first_name,
            last_name: n.last_name,
            phone: n.phone,
            role: n.role,
            email: n.email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<NewProduct> for Product {
    fn from(n: NewProduct) -> Self {
        Product {
            id: n.id,
            name: n.name,
            description: n.description,
            price_cents: n.price.cents(),
            stock: n.stock,
            image: n.image,
            category: n.category,
        }
    }
}

/// Partial product update.
///
/// For `image` and `category` the outer `Option` means "field present"; an
/// explicit JSON `null` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    #[serde(deserialize_with = "present")]
    pub image: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub category: Option<Option<String>>,
}

/// Maps a present field (even `null`) to `Some`, leaving absence to `default`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPaymentMethod {
    pub id: String,
    pub name: PaymentMethodKind,
}

impl From<NewPaymentMethod> for PaymentMethod {
    fn from(n: NewPaymentMethod) -> Self {
        PaymentMethod {
            id: n.id,
            name: n.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethodUpdate {
    pub name: Option<PaymentMethodKind>,
}

/// Payload for recording a sale. Totals are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub customer_id: String,
    pub worker_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub payment_method_id: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "P001".to_string(),
            name: "Arroz 1kg".to_string(),
            description: "Grano largo".to_string(),
            price_cents: 1000,
            stock: 20,
            image: Some("productos/arroz.png".to_string()),
            category: None,
        }
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Salesperson).unwrap(), "\"salesperson\"");
        assert_eq!(
            serde_json::from_str::<PaymentMethodKind>("\"transfer\"").unwrap(),
            PaymentMethodKind::Transfer
        );
        assert!(serde_json::from_str::<PaymentMethodKind>("\"cheque\"").is_err());

        let method = PaymentMethod {
            id: "TR".to_string(),
            name: PaymentMethodKind::Transfer,
        };
        assert_eq!(method.display_name(), "transfer");
        assert_eq!(product().display_name(), "Arroz 1kg");
    }

    #[test]
    fn test_customer_apply_keeps_absent_fields() {
        let mut customer = Customer {
            national_id: "1111111111".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Mora".to_string(),
            email: "ana@x.com".to_string(),
            phone: "0991234567".to_string(),
            address: "Quito".to_string(),
        };
        customer.apply(CustomerUpdate {
            phone: Some("0987654321".to_string()),
            ..Default::default()
        });

        assert_eq!(customer.phone, "0987654321");
        assert_eq!(customer.email, "ana@x.com");
        assert_eq!(customer.display_name(), "Ana Mora");
    }

    #[test]
    fn test_product_update_null_clears_optional() {
        let update: ProductUpdate =
            serde_json::from_str(r#"{"price": "12.50", "image": null}"#).unwrap();
        assert_eq!(update.image, Some(None));
        assert_eq!(update.category, None);

        let mut p = product();
        p.apply(update);
        assert_eq!(p.price_cents, 1250);
        assert_eq!(p.image, None);
        assert_eq!(p.name, "Arroz 1kg");
    }

    #[test]
    fn test_new_product_price_from_decimal_string() {
        let new: NewProduct = serde_json::from_str(
            r#"{"id": "P002", "name": "Leche", "description": "1L", "price": "0.95", "stock": 5}"#,
        )
        .unwrap();
        let p = Product::from(new);
        assert_eq!(p.price(), Money::from_cents(95));
        assert_eq!(p.image, None);
    }
}

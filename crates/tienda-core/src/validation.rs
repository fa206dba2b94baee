//! # Validation Module
//!
//! Field format rules for Tienda POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: REST handler (apps/api)                                      │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure, no store access)                          │
//! │  ├── national id / phone: exactly 10 digits                            │
//! │  ├── email shape, lengths, required fields                             │
//! │  └── price / quantity ranges                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: tienda-db service (store-backed)                             │
//! │  ├── id / email uniqueness                                             │
//! │  └── invoice reference resolution                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: SQLite                                                       │
//! │  └── PRIMARY KEY / UNIQUE / CHECK / FOREIGN KEY constraints            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tienda_core::validation::{validate_national_id, validate_phone};
//!
//! assert!(validate_national_id("1712345678").is_ok());
//! assert!(validate_national_id("12345").is_err());
//! assert!(validate_phone("099123456a").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{
    CustomerUpdate, NewCustomer, NewPaymentMethod, NewProduct, NewWorker, ProductUpdate,
    WorkerUpdate,
};
use crate::{
    MAX_AMOUNT_CENTS, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PAYMENT_METHOD_ID_LEN,
    MAX_PRODUCT_ID_LEN, NATIONAL_ID_LEN, PHONE_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a national id (cédula): exactly 10 ASCII digits.
///
/// No trimming is applied; surrounding whitespace is a format error.
pub fn validate_national_id(value: &str) -> ValidationResult<()> {
    exact_digits("national_id", value, NATIONAL_ID_LEN)
}

/// Validates a phone number: exactly 10 ASCII digits.
pub fn validate_phone(value: &str) -> ValidationResult<()> {
    exact_digits("phone", value, PHONE_LEN)
}

fn exact_digits(field: &str, value: &str, len: usize) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(required(field));
    }

    // Byte length equals char count once every byte is an ASCII digit
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            field,
            format!("must be exactly {} digits", len),
        ));
    }

    Ok(())
}

/// Validates a product id: 1 to 4 characters.
pub fn validate_product_id(value: &str) -> ValidationResult<()> {
    bounded_id("id", value, MAX_PRODUCT_ID_LEN)
}

/// Validates a payment method id: 1 to 10 characters.
pub fn validate_payment_method_id(value: &str) -> ValidationResult<()> {
    bounded_id("id", value, MAX_PAYMENT_METHOD_ID_LEN)
}

fn bounded_id(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(required(field));
    }

    // The id ends up in a URL path segment
    if value.contains('/') || value.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format(
            field,
            "must not contain '/' or whitespace",
        ));
    }

    max_chars(field, value, max)
}

// =============================================================================
// Text Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Required, at most 254 characters, no whitespace
/// - Exactly one `@` with a non-empty local part
/// - Domain has a dot, does not start or end with one, and has no empty
///   labels
///
/// ## Example
/// ```rust
/// use tienda_core::validation::validate_email;
///
/// assert!(validate_email("ana.mora@tienda.ec").is_ok());
/// assert!(validate_email("ana@localhost").is_err());
/// assert!(validate_email("ana mora@tienda.ec").is_err());
/// ```
pub fn validate_email(value: &str) -> ValidationResult<()> {
    const FIELD: &str = "email";

    if value.is_empty() {
        return Err(required(FIELD));
    }
    max_chars(FIELD, value, MAX_EMAIL_LEN)?;

    let invalid = || ValidationError::invalid_format(FIELD, "must be a valid email address");

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a required name-like field (first name, last name, product
/// name): non-blank, at most 100 characters.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(required(field));
    }
    max_chars(field, value, MAX_NAME_LEN)
}

/// Validates a required free-text field (address, description).
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(required(field));
    }
    Ok(())
}

/// Validates the optional product category: at most 100 characters.
pub fn validate_category(value: Option<&str>) -> ValidationResult<()> {
    match value {
        Some(v) => max_chars("category", v, MAX_NAME_LEN),
        None => Ok(()),
    }
}

fn max_chars(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an invoice quantity: strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a product price in cents: between 0 and 99,999,999.99.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_AMOUNT_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS,
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================
// Format checks only, in field order. Uniqueness is the service layer's job.

pub fn validate_new_customer(c: &NewCustomer) -> ValidationResult<()> {
    validate_national_id(&c.national_id)?;
    validate_name("first_name", &c.first_name)?;
    validate_name("last_name", &c.last_name)?;
    validate_email(&c.email)?;
    validate_phone(&c.phone)?;
    validate_text("address", &c.address)
}

pub fn validate_customer_update(u: &CustomerUpdate) -> ValidationResult<()> {
    if let Some(v) = &u.first_name {
        validate_name("first_name", v)?;
    }
    if let Some(v) = &u.last_name {
        validate_name("last_name", v)?;
    }
    if let Some(v) = &u.email {
        validate_email(v)?;
    }
    if let Some(v) = &u.phone {
        validate_phone(v)?;
    }
    if let Some(v) = &u.address {
        validate_text("address", v)?;
    }
    Ok(())
}

pub fn validate_new_worker(w: &NewWorker) -> ValidationResult<()> {
    validate_national_id(&w.national_id)?;
    validate_name("first_name", &w.first_name)?;
    validate_name("last_name", &w.last_name)?;
    validate_phone(&w.phone)?;
    validate_email(&w.email)
}

pub fn validate_worker_update(u: &WorkerUpdate) -> ValidationResult<()> {
    if let Some(v) = &u.first_name {
        validate_name("first_name", v)?;
    }
    if let Some(v) = &u.last_name {
        validate_name("last_name", v)?;
    }
    if let Some(v) = &u.phone {
        validate_phone(v)?;
    }
    if let Some(v) = &u.email {
        validate_email(v)?;
    }
    Ok(())
}

pub fn validate_new_product(p: &NewProduct) -> ValidationResult<()> {
    validate_product_id(&p.id)?;
    validate_name("name", &p.name)?;
    validate_text("description", &p.description)?;
    validate_price_cents(p.price.cents())?;
    validate_category(p.category.as_deref())
}

pub fn validate_product_update(u: &ProductUpdate) -> ValidationResult<()> {
    if let Some(v) = &u.name {
        validate_name("name", v)?;
    }
    if let Some(v) = &u.description {
        validate_text("description", v)?;
    }
    if let Some(v) = u.price {
        validate_price_cents(v.cents())?;
    }
    if let Some(v) = &u.category {
        validate_category(v.as_deref())?;
    }
    Ok(())
}

pub fn validate_new_payment_method(m: &NewPaymentMethod) -> ValidationResult<()> {
    validate_payment_method_id(&m.id)
}

// =============================================================================
// Unit Tests
// =============================================================================

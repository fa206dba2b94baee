//! # Error Types
//!
//! Domain-specific error types for tienda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tienda-core errors (this file)                                        │
//! │  ├── ValidationError  - Format failures and duplicates                 │
//! │  └── CoreError        - Validation + missing referenced entities       │
//! │                                                                         │
//! │  tienda-db errors (separate crate)                                     │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ServiceError     - CoreError | DbError from the service layer     │
//! │                                                                         │
//! │  REST errors (apps/api)                                                │
//! │  └── ApiError         - What HTTP clients see (JSON + status code)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant names the offending field so the client can point at it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Entity Kind
// =============================================================================

/// The record kinds managed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Worker,
    Product,
    PaymentMethod,
    Invoice,
}

impl EntityKind {
    /// Stable lowercase name, used in error messages and error bodies.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customer",
            EntityKind::Worker => "worker",
            EntityKind::Product => "product",
            EntityKind::PaymentMethod => "payment_method",
            EntityKind::Invoice => "invoice",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// Invoice creation resolves customer, worker, product and payment
    /// method in that order; the first one missing is reported.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity kind and id.
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `Duplicate` is the uniqueness failure; every other variant is a format
/// failure (see [`ValidationError::is_duplicate`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (wrong length, non-digits, malformed email, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value already registered for this entity kind.
    #[error("{field} '{value}' is already registered")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The request field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }

    /// True for uniqueness violations, false for format failures.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ValidationError::Duplicate { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        let err = CoreError::not_found(EntityKind::PaymentMethod, "EF01");
        assert_eq!(err.to_string(), "payment_method not found: EF01");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "first_name".to_string(),
        };
        assert_eq!(err.to_string(), "first_name is required");

        let err = ValidationError::duplicate("email", "a@x.com");
        assert_eq!(err.to_string(), "email 'a@x.com' is already registered");
    }

    #[test]
    fn test_field_and_kind() {
        let dup = ValidationError::duplicate("national_id", "1111111111");
        assert_eq!(dup.field(), "national_id");
        assert!(dup.is_duplicate());

        let fmt = ValidationError::invalid_format("phone", "must be 10 digits");
        assert_eq!(fmt.field(), "phone");
        assert!(!fmt.is_duplicate());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "address".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "address is required");
    }
}

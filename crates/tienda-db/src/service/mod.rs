//! # Service Layer
//!
//! The single entry point for creating and updating records. The REST
//! handlers and the seed tool both call these functions, so every path runs
//! the same checks.
//!
//! ## Check Order on Create
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Field formats        tienda_core::validation   → ValidationError   │
//! │  2. Id uniqueness        repo.exists_by_id          → Duplicate(id)     │
//! │  3. Email uniqueness     repo.exists_by_email       → Duplicate(email)  │
//! │  4. INSERT               UNIQUE violation (race)    → Duplicate(field)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`registration`] - customers, workers, products, payment methods
//! - [`invoicing`] - invoice creation

use thiserror::Error;

use crate::error::DbError;
use tienda_core::{CoreError, ValidationError};

pub mod invoicing;
pub mod registration;

pub use invoicing::create_invoice;
pub use registration::{
    create_customer, create_payment_method, create_product, create_worker, update_customer,
    update_payment_method, update_product, update_worker,
};

/// Errors returned by service functions.
///
/// `Core` carries the caller's mistakes (bad format, duplicate, missing
/// reference). `Db` carries storage failures, plus `DbError::NotFound` when
/// the record being updated does not exist.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Turns a UNIQUE violation raised by the store into a `Duplicate` for the
/// same field. `value_of` supplies the submitted value for that column.
pub(crate) fn unique_to_duplicate<'a>(
    err: DbError,
    value_of: impl Fn(&str) -> Option<&'a str>,
) -> ServiceError {
    match err {
        DbError::UniqueViolation { field, value } => {
            let value = value_of(&field).map(str::to_string).unwrap_or(value);
            ValidationError::duplicate(field, value).into()
        }
        other => other.into(),
    }
}

/// Maps a failed insert of a customer or worker. SQLite names a single
/// column even when both collide, so a taken national id is reported ahead
/// of the email whatever column the store named.
pub(crate) fn registration_conflict(
    err: DbError,
    id_taken: bool,
    national_id: &str,
    email: &str,
) -> ServiceError {
    if id_taken {
        return ValidationError::duplicate("national_id", national_id).into();
    }
    unique_to_duplicate(err, |field| (field == "email").then_some(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_becomes_duplicate() {
        let err = unique_to_duplicate(DbError::duplicate("email", "unknown"), |field| {
            (field == "email").then_some("a@x.com")
        });

        match err {
            ServiceError::Core(CoreError::Validation(ValidationError::Duplicate {
                field,
                value,
            })) => {
                assert_eq!(field, "email");
                assert_eq!(value, "a@x.com");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_taken_id_reported_ahead_of_email() {
        let err = registration_conflict(
            DbError::duplicate("email", "unknown"),
            true,
            "1111111111",
            "a@x.com",
        );
        match err {
            ServiceError::Core(CoreError::Validation(v)) => {
                assert_eq!(v, ValidationError::duplicate("national_id", "1111111111"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = registration_conflict(
            DbError::duplicate("email", "unknown"),
            false,
            "1111111111",
            "a@x.com",
        );
        match err {
            ServiceError::Core(CoreError::Validation(v)) => {
                assert_eq!(v, ValidationError::duplicate("email", "a@x.com"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_other_db_errors_pass_through() {
        let err = unique_to_duplicate(DbError::PoolExhausted, |_| None);
        assert!(matches!(err, ServiceError::Db(DbError::PoolExhausted)));
    }
}

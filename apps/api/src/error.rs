//! # API Error Type
//!
//! Unified error type for REST handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tienda POS                             │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │       │                                                                 │
//! │       ├── JsonRejection              → 400 BAD_REQUEST                 │
//! │       ├── ValidationError (format)   → 400 FORMAT_ERROR                │
//! │       ├── ValidationError::Duplicate → 400 DUPLICATE                   │
//! │       ├── CoreError::NotFound        → 400 NOT_FOUND  (invoice refs)   │
//! │       ├── DbError::NotFound          → 404 NOT_FOUND  (path resource)  │
//! │       └── other DbError              → 500 DATABASE_ERROR (logged)     │
//! │                                                                         │
//! │  Body: { "code": "...", "message": "...", "field": "..." }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failure details are logged, never returned to the client.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tienda_core::{CoreError, EntityKind, ValidationError};
use tienda_db::{DbError, ServiceError};

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "FORMAT_ERROR",
///   "message": "national_id has invalid format: must be exactly 10 digits",
///   "field": "national_id"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Request field the error refers to, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A field failed its format check (400)
    FormatError,

    /// Id or email already registered (400)
    Duplicate,

    /// Path resource (404) or invoice reference (400) missing
    NotFound,

    /// Body could not be parsed (400)
    BadRequest,

    /// Storage failure (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
            field: None,
        }
    }

    fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// 404 for a resource addressed by the request path.
    pub fn not_found(entity: EntityKind, id: &str) -> Self {
        ApiError::new(
            StatusCode::NOT_FOUND,
            ErrorCode::NotFound,
            format!("{} not found: {}", entity, id),
        )
    }

    fn database() -> Self {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DatabaseError,
            "Database operation failed",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = if err.is_duplicate() {
            ErrorCode::Duplicate
        } else {
            ErrorCode::FormatError
        };
        let field = err.field().to_string();
        ApiError::new(StatusCode::BAD_REQUEST, code, err.to_string()).with_field(field)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            // Named in the request body, not the path
            CoreError::NotFound { entity, id } => ApiError::new(
                StatusCode::BAD_REQUEST,
                ErrorCode::NotFound,
                format!("{} not found: {}", entity, id),
            )
            .with_field(format!("{}_id", entity.as_str())),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::new(
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                format!("{} not found: {}", entity, id),
            ),
            DbError::UniqueViolation { field, value } => {
                ValidationError::duplicate(field, value).into()
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::NotFound,
                    "Invalid reference",
                )
            }
            DbError::CheckViolation { message } => {
                tracing::warn!("Check constraint failed: {}", message);
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::FormatError,
                    "A field is outside its allowed range",
                )
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::database()
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(e) => e.into(),
            ServiceError::Db(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            rejection.body_text(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_mapping() {
        let err: ApiError = ValidationError::invalid_format("phone", "must be exactly 10 digits").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, ErrorCode::FormatError);
        assert_eq!(err.field.as_deref(), Some("phone"));

        let err: ApiError = ValidationError::duplicate("email", "a@x.com").into();
        assert_eq!(err.code, ErrorCode::Duplicate);
    }

    #[test]
    fn test_missing_reference_is_bad_request() {
        let err: ApiError = ServiceError::from(CoreError::not_found(EntityKind::Product, "P9")).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.field.as_deref(), Some("product_id"));
    }

    #[test]
    fn test_db_mapping() {
        let err: ApiError = DbError::not_found("customer", "1111111111").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_body_shape() {
        let err: ApiError = ValidationError::duplicate("national_id", "1111111111").into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "DUPLICATE");
        assert_eq!(json["field"], "national_id");
        assert!(json.get("status").is_none());

        let json = serde_json::to_value(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Internal,
            "boom",
        )).unwrap();
        assert!(json.get("field").is_none());
    }
}

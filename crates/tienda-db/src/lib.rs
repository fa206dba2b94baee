//! # tienda-db: Database Layer for Tienda POS
//!
//! SQLite storage for the five record kinds, plus the service functions
//! that run the store-backed checks (uniqueness, invoice references).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda POS Data Flow                             │
//! │                                                                         │
//! │  REST handler (POST /api/facturas)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tienda-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐                                             │   │
//! │  │   │   service     │  create_customer / create_invoice / ...     │   │
//! │  │   └───────┬───────┘                                             │   │
//! │  │           ▼                                                     │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ customer.rs   │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ invoice.rs ...│    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (TIENDA_DB_PATH)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per record kind
//! - [`service`] - Create/update entry points with all checks applied
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tienda_db::{service, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("tienda.db")).await?;
//!
//! let customer = service::create_customer(&db, new_customer).await?;
//! let invoices = db.invoices().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use service::{ServiceError, ServiceResult};

pub use repository::customer::CustomerRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::payment_method::PaymentMethodRepository;
pub use repository::product::ProductRepository;
pub use repository::worker::WorkerRepository;

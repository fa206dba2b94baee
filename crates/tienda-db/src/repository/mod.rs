//! # Repository Module
//!
//! Database repository implementations for Tienda POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  REST handler / service function                                       │
//! │       │                                                                 │
//! │       │  db.customers().get_by_id("1712345678")                        │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                    │
//! │  ├── list / get_by_id                                                  │
//! │  ├── exists_by_id / exists_by_email                                    │
//! │  ├── insert / update                                                   │
//! │  └── delete                                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories do no validation. Go through [`crate::service`] to create or
//! update records.
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository)
//! - [`WorkerRepository`](worker::WorkerRepository)
//! - [`ProductRepository`](product::ProductRepository)
//! - [`PaymentMethodRepository`](payment_method::PaymentMethodRepository)
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - insert and delete only

pub mod customer;
pub mod invoice;
pub mod payment_method;
pub mod product;
pub mod worker;

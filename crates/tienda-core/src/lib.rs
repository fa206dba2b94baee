//! # tienda-core: Pure Business Logic for Tienda POS
//!
//! This crate holds the domain records, the money type, field validation and
//! the invoice math. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST API (apps/api)                          │   │
//! │  │   /clientes  /trabajadores  /productos  /formas-pago  /facturas │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tienda-db (repositories + services)                │   │
//! │  │        uniqueness checks, reference resolution, SQLite          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  invoice  │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │  Totals   │  │  formats  │  │   │
//! │  │   │  Invoice  │  │  TaxRate  │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Customer, Worker, Product, PaymentMethod, Invoice)
//! - [`money`] - Fixed-point money in integer cents
//! - [`invoice`] - Subtotal / tax / total derivation
//! - [`validation`] - Field format rules shared by every entry point
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::invoice::InvoiceTotals;
//! use tienda_core::money::Money;
//!
//! let price = Money::from_cents(1000); // 10.00
//! let totals = InvoiceTotals::compute(price, 3).unwrap();
//!
//! assert_eq!(totals.subtotal.to_string(), "30.00");
//! assert_eq!(totals.tax.to_string(), "4.50");
//! assert_eq!(totals.total.to_string(), "34.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, EntityKind, ValidationError};
pub use invoice::InvoiceTotals;
pub use money::{Money, TaxRate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax applied to every invoice subtotal: 15%.
pub const TAX_RATE: TaxRate = TaxRate::from_bps(1500);

/// Largest amount a money column holds: 10 digits, 2 of them fractional
/// (99,999,999.99).
pub const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

/// Length of a national id (cédula) and of a phone number.
pub const NATIONAL_ID_LEN: usize = 10;
pub const PHONE_LEN: usize = 10;

/// Column limits.
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PRODUCT_ID_LEN: usize = 4;
pub const MAX_PAYMENT_METHOD_ID_LEN: usize = 10;
pub const MAX_EMAIL_LEN: usize = 254;

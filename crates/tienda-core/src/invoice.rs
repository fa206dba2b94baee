//! # Invoice Totals
//!
//! Derives the monetary columns of an invoice from a unit price and a
//! quantity.
//!
//! ## Calculation
//! ```text
//!   subtotal = unit_price × quantity
//!   tax      = round_half_even(subtotal × 15%)      (to the cent)
//!   total    = subtotal + tax
//! ```
//!
//! All three amounts must fit a money column (see [`crate::MAX_AMOUNT_CENTS`]).
//! Callers never supply these values; they are recomputed on every create.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_quantity;
use crate::{MAX_AMOUNT_CENTS, TAX_RATE};

/// The derived amounts of one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl InvoiceTotals {
    /// Computes subtotal, tax and total for `quantity` units at `unit_price`.
    ///
    /// ## Errors
    /// - `MustBePositive { field: "quantity" }` when `quantity <= 0`
    /// - `OutOfRange { field: "total" | "subtotal" }` when an amount does not
    ///   fit a money column
    pub fn compute(unit_price: Money, quantity: i64) -> Result<Self, ValidationError> {
        validate_quantity(quantity)?;

        let subtotal = unit_price
            .multiply_quantity(quantity)
            .filter(|m| m.cents() <= MAX_AMOUNT_CENTS)
            .ok_or_else(|| amount_out_of_range("subtotal"))?;

        let tax = subtotal.calculate_tax(TAX_RATE);

        let total = subtotal
            .checked_add(tax)
            .filter(|m| m.cents() <= MAX_AMOUNT_CENTS)
            .ok_or_else(|| amount_out_of_range("total"))?;

        Ok(InvoiceTotals {
            subtotal,
            tax,
            total,
        })
    }
}

fn amount_out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: MAX_AMOUNT_CENTS,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_units_at_ten() {
        let totals = InvoiceTotals::compute(Money::from_cents(1000), 3).unwrap();
        assert_eq!(totals.subtotal, Money::from_cents(3000));
        assert_eq!(totals.tax, Money::from_cents(450));
        assert_eq!(totals.total, Money::from_cents(3450));
    }

    #[test]
    fn test_tax_rounds_to_cents() {
        // 0.33 × 15% = 0.0495 → 0.05
        let totals = InvoiceTotals::compute(Money::from_cents(33), 1).unwrap();
        assert_eq!(totals.tax, Money::from_cents(5));
        assert_eq!(totals.total, Money::from_cents(38));

        // 0.10 × 15% = 0.015 → 0.02 (half to even)
        let totals = InvoiceTotals::compute(Money::from_cents(10), 1).unwrap();
        assert_eq!(totals.tax, Money::from_cents(2));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let totals = InvoiceTotals::compute(Money::zero(), 7).unwrap();
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        for qty in [0, -1, i64::MIN] {
            let err = InvoiceTotals::compute(Money::from_cents(1000), qty).unwrap_err();
            assert_eq!(err.field(), "quantity");
        }
    }

    #[test]
    fn test_amount_overflow_rejected() {
        let err = InvoiceTotals::compute(Money::from_cents(MAX_AMOUNT_CENTS), 2).unwrap_err();
        assert_eq!(err.field(), "subtotal");

        // Subtotal fits, total with tax does not
        let err = InvoiceTotals::compute(Money::from_cents(9_000_000_000), 1).unwrap_err();
        assert_eq!(err.field(), "total");

        let err = InvoiceTotals::compute(Money::from_cents(i64::MAX), i64::MAX).unwrap_err();
        assert_eq!(err.field(), "subtotal");
    }

    #[test]
    fn test_total_is_sum_for_many_inputs() {
        for price in (0..5_000).step_by(37) {
            for qty in 1..12 {
                let t = InvoiceTotals::compute(Money::from_cents(price), qty).unwrap();
                assert_eq!(t.subtotal.cents(), price * qty);
                assert_eq!(t.total, t.subtotal + t.tax);
                assert!(t.tax.cents() >= 0);
            }
        }
    }
}

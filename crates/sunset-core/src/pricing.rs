//! # Pricing Engine
//!
//! Pure money derivations over a line-item collection.
//!
//! ## The Service Tax Step
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SERVICE TAX IS A STEP FUNCTION, NOT A MARGINAL RATE                    │
//! │                                                                         │
//! │  subtotal < 3000   →  tax = 0                                           │
//! │  subtotal ≥ 3000   →  tax = 5% of the WHOLE subtotal                    │
//! │                                                                         │
//! │  Rs 2999.99  →  tax Rs 0.00      (just under the step)                  │
//! │  Rs 3000.00  →  tax Rs 150.00    (the whole base, not the excess)       │
//! │  Rs 3001.00  →  tax Rs 150.05    (exact, kept unrounded)                │
//! │                                                                         │
//! │  Crossing the threshold by one rupee raises the bill by ~Rs 150.        │
//! │  That cliff is the till's actual rule; do not "fix" it to marginal.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is deterministic on its input and touches nothing
//! else. Callers re-derive rather than cache: `change` is recomputed from
//! the live cart on every keystroke of the cash field.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::items::LineItem;
use crate::money::Money;

// =============================================================================
// Constants
// =============================================================================

/// Subtotal at or above which service tax applies (inclusive).
pub const SERVICE_TAX_THRESHOLD: Money = Money::from_decimal(dec!(3000));

/// Service tax rate applied to the whole subtotal once the threshold is hit.
pub const SERVICE_TAX_RATE: Decimal = dec!(0.05);

// =============================================================================
// Derivations
// =============================================================================

/// Sum of `unit_price × quantity` over all lines.
///
/// Fails with `InvalidQuantity` if any line carries a quantity below 1;
/// such a line should never exist (containers remove lines at 0), so a
/// hit here means corrupted input, not a user mistake.
pub fn subtotal(items: &[LineItem]) -> CoreResult<Money> {
    let mut total = Money::zero();
    for item in items {
        if item.quantity < 1 {
            return Err(CoreError::InvalidQuantity {
                name: item.name.clone(),
                quantity: item.quantity,
            });
        }
        total += item.line_total();
    }
    Ok(total)
}

/// Service tax for a line-item collection: 5% of the subtotal when the
/// subtotal reaches `SERVICE_TAX_THRESHOLD`, else zero.
pub fn service_tax(items: &[LineItem]) -> CoreResult<Money> {
    Ok(service_tax_on(subtotal(items)?))
}

/// The step function itself, for callers that already hold a subtotal.
pub fn service_tax_on(subtotal: Money) -> Money {
    if subtotal >= SERVICE_TAX_THRESHOLD {
        subtotal * SERVICE_TAX_RATE
    } else {
        Money::zero()
    }
}

/// Subtotal plus service tax.
pub fn grand_total(items: &[LineItem]) -> CoreResult<Money> {
    let subtotal = subtotal(items)?;
    Ok(subtotal + service_tax_on(subtotal))
}

/// Cash received minus grand total.
///
/// May be negative: the engine reports the shortfall, it does not reject
/// it. Warning the cashier is the caller's job.
pub fn change(cash_received: Money, grand_total: Money) -> Money {
    cash_received - grand_total
}

// =============================================================================
// Totals Bundle
// =============================================================================

/// One-call pricing summary for display and receipts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub service_tax: Money,
    pub grand_total: Money,
}

impl Totals {
    /// Derives all three figures in one pass over the lines.
    pub fn compute(items: &[LineItem]) -> CoreResult<Totals> {
        let subtotal = subtotal(items)?;
        let service_tax = service_tax_on(subtotal);
        Ok(Totals {
            subtotal,
            service_tax,
            grand_total: subtotal + service_tax,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: i64, quantity: i64) -> LineItem {
        LineItem {
            item_id: id.to_string(),
            name: format!("Item {}", id),
            unit_price: Money::from_rupees(price),
            quantity,
        }
    }

    #[test]
    fn test_subtotal_below_threshold_has_no_tax() {
        // 1000×2 + 500×1 = 2500, under the step
        let items = [line("a", 1000, 2), line("b", 500, 1)];

        assert_eq!(subtotal(&items).unwrap(), Money::from_rupees(2500));
        assert_eq!(service_tax(&items).unwrap(), Money::zero());
        assert_eq!(grand_total(&items).unwrap(), Money::from_rupees(2500));
    }

    #[test]
    fn test_subtotal_over_threshold_taxes_whole_base() {
        // 2000×2 = 4000 → 5% of 4000 = 200
        let items = [line("a", 2000, 2)];

        assert_eq!(subtotal(&items).unwrap(), Money::from_rupees(4000));
        assert_eq!(service_tax(&items).unwrap(), Money::from_rupees(200));
        assert_eq!(grand_total(&items).unwrap(), Money::from_rupees(4200));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // Exactly 3000 is taxed; one paisa under is not
        assert_eq!(
            service_tax_on(Money::from_rupees(3000)),
            Money::from_rupees(150)
        );
        assert_eq!(
            service_tax_on(Money::from_decimal(dec!(2999.99))),
            Money::zero()
        );
    }

    #[test]
    fn test_tax_stays_exact_above_threshold() {
        // 5% of 3001 = 150.05, carried without rounding
        let tax = service_tax_on(Money::from_rupees(3001));
        assert_eq!(tax.amount(), dec!(150.05));
    }

    #[test]
    fn test_grand_total_equals_subtotal_plus_tax() {
        let collections: [&[LineItem]; 4] = [
            &[],
            &[line("a", 100, 1)],
            &[line("a", 1500, 2)],
            &[line("a", 2999, 1), line("b", 1, 1)],
        ];
        for items in collections {
            let expected = subtotal(items).unwrap() + service_tax(items).unwrap();
            assert_eq!(grand_total(items).unwrap(), expected);
        }
    }

    #[test]
    fn test_change_may_be_negative() {
        let total = Money::from_rupees(4200);

        assert_eq!(change(Money::from_rupees(4200), total), Money::zero());
        assert_eq!(
            change(Money::from_rupees(4000), total),
            Money::from_rupees(-200)
        );
        assert!(change(Money::from_rupees(4000), total).is_negative());
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let items = [line("a", 1000, 2), line("b", 500, 0)];
        let err = subtotal(&items).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { quantity: 0, .. }));
        assert!(grand_total(&items).is_err());
    }

    #[test]
    fn test_totals_bundle_matches_parts() {
        let items = [line("a", 2000, 2), line("b", 350, 1)];
        let totals = Totals::compute(&items).unwrap();

        assert_eq!(totals.subtotal, Money::from_rupees(4350));
        assert_eq!(totals.service_tax.amount(), dec!(217.50));
        assert_eq!(totals.grand_total.amount(), dec!(4567.50));
    }
}

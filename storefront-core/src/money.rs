//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done on `Decimal` internally and converted to `f64`
//! only at the serialization boundary, rounded half-up to 2 decimal
//! places.

use rust_decimal::prelude::*;
use shared::models::cart::{CartItem, CartTotals};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// GST rate applied to every cart, in percent. Fixed, no configuration
/// path.
pub const TAX_RATE_PERCENT: i64 = 18;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compute cart totals
///
/// `subtotal = Σ price × quantity`, `taxes = round2(subtotal × 18%)`,
/// `total = subtotal + taxes`.
pub fn cart_totals(items: &[CartItem]) -> CartTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| to_decimal(item.price) * Decimal::from(item.quantity))
        .sum();

    let taxes = (subtotal * Decimal::from(TAX_RATE_PERCENT) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let total = subtotal + taxes;

    CartTotals {
        subtotal: to_f64(subtotal),
        taxes: to_f64(taxes),
        total: to_f64(total),
    }
}

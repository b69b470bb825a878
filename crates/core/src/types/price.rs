//! Price helpers using decimal arithmetic.
//!
//! Prices arrive from the remote API as JSON numbers and are held as
//! [`Decimal`] so that cart totals never show binary floating-point
//! artifacts (e.g. `24.489999999`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept when displaying or totalling prices.
pub const CENT_PLACES: u32 = 2;

/// Truncate an amount to whole cents, rounding toward negative infinity.
///
/// This is a floor, not a round: `24.499` becomes `24.49`.
///
/// ```
/// use rust_decimal::Decimal;
/// use shopfront_core::floor_to_cents;
///
/// assert_eq!(floor_to_cents(Decimal::new(24_499, 3)), Decimal::new(2449, 2));
/// ```
#[must_use]
pub fn floor_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::ToNegativeInfinity)
}

/// Format an amount for display with the configured currency symbol.
///
/// The symbol is prepended verbatim and may be empty. Sub-cent digits are
/// floored the same way totals are.
///
/// ```
/// use rust_decimal::Decimal;
/// use shopfront_core::format_price;
///
/// assert_eq!(format_price("$", Decimal::new(45, 1)), "$4.50");
/// assert_eq!(format_price("", Decimal::new(1999, 2)), "19.99");
/// ```
#[must_use]
pub fn format_price(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{:.2}", floor_to_cents(amount))
}

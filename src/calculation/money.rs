//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every invoice amount is rounded to.
pub const CURRENCY_PRECISION: u32 = 2;

/// Rounds an amount to currency precision, halves away from zero.
///
/// The result always carries exactly [`CURRENCY_PRECISION`] decimal places, so
/// `171` comes back as `171.00`.
///
/// # Examples
///
/// ```
/// use hotel_pricing_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("10.004").unwrap()), Decimal::from_str("10.00").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(CURRENCY_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_PRECISION);
    rounded
}

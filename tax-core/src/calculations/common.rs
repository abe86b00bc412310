//! Shared helpers for cents rounding and decimal comparisons.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole cents, sending exact midpoints away from zero.
///
/// The result always carries exactly two decimal places, so `27500` comes back
/// as `27500.00`. Calculators call this once, on their final figure;
/// intermediate sums keep full precision.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(27499.995)), dec!(27500.00));
/// assert_eq!(round_half_up(dec!(20.994)), dec!(20.99));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// The larger of `a` and `b`.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// The smaller of `a` and `b`.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

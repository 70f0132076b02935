//! Common utility functions for payroll calculations.
//!
//! This module provides the rounding and annualization helpers shared by the
//! contribution engine, the gross resolver and the year comparator.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Months in a payroll year, used to annualize monthly differences.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly half a cent are rounded up towards positive infinity, so
/// `0.005` becomes `0.01` and `-0.005` becomes zero. Only negative midpoints,
/// such as a percentage change of `-0.125`, differ from away-from-zero
/// rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(271.754)), dec!(271.75));
/// assert_eq!(round_half_up(dec!(443.0886)), dec!(443.09));
/// assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(0.00)); // Towards +infinity
/// assert_eq!(round_half_up(dec!(-0.006)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(2, strategy)
}

/// Multiplies a monthly amount by twelve and rounds to the cent.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::annualize;
///
/// assert_eq!(annualize(dec!(-95.14)), dec!(-1141.68));
/// ```
pub fn annualize(monthly: Decimal) -> Decimal {
    round_half_up(monthly * MONTHS_PER_YEAR)
}

/// Expresses `part` as a percentage of `whole`, rounded to two decimals.
///
/// Returns `None` when `whole` is zero.
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Option<Decimal> {
    part.checked_div(whole)
        .map(|ratio| round_half_up(ratio * Decimal::ONE_HUNDRED))
}

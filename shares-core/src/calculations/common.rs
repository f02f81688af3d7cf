//! Common helpers for the trade calculations.
//!
//! Rounding and unit conversion shared by every step of the derivation.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::models::{Entry, Figure};

const PENCE_PER_POUND: Decimal = dec!(100);

/// Rounds a figure to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero. `NotANumber` passes
/// through unchanged.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use shares_core::Figure;
/// use shares_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(Figure::from(dec!(123.454))), Figure::from(dec!(123.45)));
/// assert_eq!(round_half_up(Figure::from(dec!(123.455))), Figure::from(dec!(123.46)));
/// assert_eq!(round_half_up(Figure::from(dec!(-123.455))), Figure::from(dec!(-123.46)));
/// assert_eq!(round_half_up(Figure::NotANumber), Figure::NotANumber);
/// ```
pub fn round_half_up(value: Figure) -> Figure {
    match value {
        Figure::Value(v) => {
            Figure::Value(v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        }
        Figure::NotANumber => Figure::NotANumber,
    }
}

/// Converts a price entered in pence to pounds.
///
/// Only strictly positive prices convert. Zero, negative, unset and
/// non-numeric prices all count as a price of zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use shares_core::{Entry, Figure};
/// use shares_core::calculations::common::pounds;
///
/// assert_eq!(pounds(&Entry::parse("225")), Figure::from(dec!(2.25)));
/// assert_eq!(pounds(&Entry::parse("-10")), Figure::ZERO);
/// assert_eq!(pounds(&Entry::Unset), Figure::ZERO);
/// ```
pub fn pounds(pence: &Entry) -> Figure {
    match pence.number() {
        Some(p) if p > Decimal::ZERO => Figure::Value(p / PENCE_PER_POUND),
        _ => Figure::ZERO,
    }
}

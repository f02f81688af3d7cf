use std::{
    fmt,
    ops::{Add, Div, Mul, Sub},
};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A calculated amount: either a finite decimal or "not a number".
///
/// Arithmetic never panics. Any operation touching `NotANumber`, any
/// overflow and any division by zero produce `NotANumber`, which then
/// flows through every later step and renders as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Figure {
    Value(Decimal),
    NotANumber,
}

impl Figure {
    pub const ZERO: Figure = Figure::Value(Decimal::ZERO);

    /// The finite value, if there is one.
    pub fn value(self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotANumber => None,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Self::NotANumber)
    }

    /// Formats with exactly two decimal places, or `NaN`.
    ///
    /// Zero of either sign renders as `0.00`.
    pub fn to_fixed(self) -> String {
        match self {
            Self::Value(v) => {
                let rounded = v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                if rounded.is_zero() {
                    "0.00".to_string()
                } else {
                    format!("{rounded:.2}")
                }
            }
            Self::NotANumber => "NaN".to_string(),
        }
    }

    fn combine(
        self,
        rhs: Figure,
        op: fn(Decimal, Decimal) -> Option<Decimal>,
    ) -> Figure {
        match (self, rhs) {
            (Self::Value(a), Self::Value(b)) => op(a, b).map_or(Self::NotANumber, Self::Value),
            _ => Self::NotANumber,
        }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Figure {
    fn from(value: Decimal) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for Figure {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.to_fixed())
    }
}

impl Add for Figure {
    type Output = Figure;

    fn add(
        self,
        rhs: Figure,
    ) -> Figure {
        self.combine(rhs, Decimal::checked_add)
    }
}

impl Sub for Figure {
    type Output = Figure;

    fn sub(
        self,
        rhs: Figure,
    ) -> Figure {
        self.combine(rhs, Decimal::checked_sub)
    }
}

impl Mul for Figure {
    type Output = Figure;

    fn mul(
        self,
        rhs: Figure,
    ) -> Figure {
        self.combine(rhs, Decimal::checked_mul)
    }
}

impl Div for Figure {
    type Output = Figure;

    fn div(
        self,
        rhs: Figure,
    ) -> Figure {
        self.combine(rhs, Decimal::checked_div)
    }
}

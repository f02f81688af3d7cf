use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The transaction tax applied to share purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampDuty {
    /// Fraction of the buy subtotal charged as tax.
    pub rate: Decimal,
    /// Factor applied to the buy price when working out the percentage return.
    pub price_multiplier: Decimal,
}

impl StampDuty {
    /// UK stamp duty reserve tax on electronic share purchases (0.5%).
    pub const UK: StampDuty = StampDuty {
        rate: dec!(0.005),
        price_multiplier: dec!(1.005),
    };
}

impl Default for StampDuty {
    fn default() -> Self {
        Self::UK
    }
}

use serde::{Deserialize, Serialize};

use super::Figure;

/// Figures calculated from a [`TradeInputs`](super::TradeInputs) snapshot.
///
/// All money values are in pounds and already rounded to two places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedOutputs {
    /// Stamp duty on the buy order, whether or not it is included.
    pub tax_amount: Figure,
    pub buy_total: Figure,
    pub sell_total: Figure,
    /// Profit (or loss) on the shares sold.
    pub return_value: Figure,
    /// Percentage return per share, without the `%` sign.
    pub return_percent: Figure,
}

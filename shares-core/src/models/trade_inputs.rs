use serde::{Deserialize, Serialize};

use super::Entry;

/// Snapshot of everything the user has entered on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInputs {
    // Prices are in pence, as typed
    pub buy_price: Entry,
    pub sell_price: Entry,

    // Unitless share counts
    pub buy_shares: Entry,
    pub sell_shares: Entry,

    /// Include stamp duty in the buy total and the percentage return.
    pub tax_enabled: bool,

    /// Set once the user edits the sell shares directly. Until then the sell
    /// side follows the buy side.
    pub sell_shares_touched: bool,
}

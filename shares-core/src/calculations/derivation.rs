//! Derivation of the trade figures from the form inputs.
//!
//! Every figure is worked out from the full [`TradeInputs`] snapshot in a
//! fixed order. Each money value is rounded to two places before any later
//! step reads it.
//!
//! | Step | Figure | Rule |
//! |------|--------|------|
//! | 1 | buy subtotal | pounds(buy price) × buy shares |
//! | 2 | sell subtotal | pounds(sell price) × sell shares |
//! | 3 | stamp duty | pounds(buy price) × buy shares × rate |
//! | 4 | buy total | buy subtotal (+ stamp duty when included) |
//! | 5 | sell total | sell subtotal |
//! | 6 | return | sell total − buy total × (sell shares / buy shares); 0 with no sell price |
//! | 7 | return (%) | (sell price − buy price × multiplier) / buy price × 100; 0 when buy total is `0.00` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use shares_core::calculations::DerivationEngine;
//! use shares_core::{Entry, StampDuty, TradeInputs};
//!
//! let inputs = TradeInputs {
//!     buy_price: Entry::parse("150"),
//!     buy_shares: Entry::parse("500"),
//!     sell_price: Entry::parse("200"),
//!     sell_shares: Entry::parse("500"),
//!     tax_enabled: true,
//!     ..Default::default()
//! };
//!
//! let outputs = DerivationEngine::new(StampDuty::UK).calculate(&inputs);
//!
//! assert_eq!(outputs.tax_amount.value(), Some(dec!(3.75)));
//! assert_eq!(outputs.buy_total.value(), Some(dec!(753.75)));
//! assert_eq!(outputs.return_value.value(), Some(dec!(246.25)));
//! assert_eq!(outputs.return_percent.value(), Some(dec!(32.83)));
//! ```

use rust_decimal_macros::dec;
use tracing::trace;

use crate::calculations::common::{pounds, round_half_up};
use crate::models::{DerivedOutputs, Entry, Figure, StampDuty, TradeInputs};

/// Recomputes every derived figure using UK stamp duty.
pub fn recompute_all(inputs: &TradeInputs) -> DerivedOutputs {
    DerivationEngine::default().calculate(inputs)
}

/// Calculator for the derived trade figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivationEngine {
    stamp_duty: StampDuty,
}

impl DerivationEngine {
    pub fn new(stamp_duty: StampDuty) -> Self {
        Self { stamp_duty }
    }

    /// Calculates all five figures from the snapshot.
    ///
    /// Pure: the same snapshot always gives the same outputs. Bad input never
    /// fails here; it shows up as [`Figure::NotANumber`] in the outputs.
    pub fn calculate(
        &self,
        inputs: &TradeInputs,
    ) -> DerivedOutputs {
        let buy_subtotal = self.order_subtotal(&inputs.buy_price, &inputs.buy_shares);
        let sell_subtotal = self.order_subtotal(&inputs.sell_price, &inputs.sell_shares);

        let tax_amount = self.tax_amount(&inputs.buy_price, &inputs.buy_shares);
        let buy_total = self.buy_total(buy_subtotal, tax_amount, inputs.tax_enabled);
        let sell_total = sell_subtotal;

        let return_value = self.return_value(inputs, buy_total, sell_total);
        let return_percent = self.return_percent(inputs, buy_total);

        trace!(
            %buy_total,
            %sell_total,
            %tax_amount,
            %return_value,
            %return_percent,
            "derived figures recomputed"
        );

        DerivedOutputs {
            tax_amount,
            buy_total,
            sell_total,
            return_value,
            return_percent,
        }
    }

    /// Value of an order before any tax.
    fn order_subtotal(
        &self,
        price: &Entry,
        shares: &Entry,
    ) -> Figure {
        round_half_up(pounds(price) * shares.figure())
    }

    /// Stamp duty on the buy order. Always calculated, even when excluded.
    fn tax_amount(
        &self,
        buy_price: &Entry,
        buy_shares: &Entry,
    ) -> Figure {
        round_half_up(pounds(buy_price) * buy_shares.figure() * Figure::from(self.stamp_duty.rate))
    }

    fn buy_total(
        &self,
        buy_subtotal: Figure,
        tax_amount: Figure,
        tax_enabled: bool,
    ) -> Figure {
        if tax_enabled {
            round_half_up(buy_subtotal + tax_amount)
        } else {
            buy_subtotal
        }
    }

    /// Profit on the shares sold, charging them their share of the buy total.
    ///
    /// Selling no shares costs nothing; buying no shares leaves the cost
    /// undefined.
    fn return_value(
        &self,
        inputs: &TradeInputs,
        buy_total: Figure,
        sell_total: Figure,
    ) -> Figure {
        if inputs.sell_price.is_unset() {
            return Figure::ZERO;
        }

        let portion_sold = inputs.sell_shares.figure() / inputs.buy_shares.figure();
        let cost_of_shares_sold = buy_total * portion_sold;

        round_half_up(sell_total - cost_of_shares_sold)
    }

    /// Percentage gain per share, using the raw pence prices.
    fn return_percent(
        &self,
        inputs: &TradeInputs,
        buy_total: Figure,
    ) -> Figure {
        // Compared as displayed so a buy side that rounds to nothing counts as empty
        if buy_total.to_fixed() == "0.00" {
            return Figure::ZERO;
        }

        let buy_price = inputs.buy_price.figure();
        let sell_price = inputs.sell_price.figure();
        let cost_price = if inputs.tax_enabled {
            buy_price * Figure::from(self.stamp_duty.price_multiplier)
        } else {
            buy_price
        };

        round_half_up((sell_price - cost_price) / buy_price * Figure::from(dec!(100)))
    }
}

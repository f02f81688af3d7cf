//! Form state for the shares return calculator.
//!
//! The controller owns what the user has typed, applies the per-field rules
//! (sell shares follow buy shares until edited, and can never exceed them)
//! and recomputes the derived figures after every change.

use tracing::debug;

use crate::calculations::DerivationEngine;
use crate::models::{DerivedOutputs, Entry, FieldEvent, Figure, StampDuty, TradeInputs};

/// Owner of the form state for one session.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    inputs: TradeInputs,
    outputs: DerivedOutputs,
    engine: DerivationEngine,

    /// Whether the buy and sell totals are shown. Display only.
    show_details: bool,
}

impl InputController {
    /// Create an empty form using UK stamp duty.
    pub fn new() -> Self {
        Self::with_stamp_duty(StampDuty::UK)
    }

    pub fn with_stamp_duty(stamp_duty: StampDuty) -> Self {
        let engine = DerivationEngine::new(stamp_duty);
        let inputs = TradeInputs::default();
        let outputs = engine.calculate(&inputs);

        Self {
            inputs,
            outputs,
            engine,
            show_details: false,
        }
    }

    /// Apply one edit and recompute.
    pub fn on_field_change(&mut self, event: FieldEvent) {
        debug!(field = event.field().as_str(), ?event, "field changed");

        match event {
            FieldEvent::BuyPrice(raw) => self.inputs.buy_price = Entry::parse(&raw),
            FieldEvent::SellPrice(raw) => self.inputs.sell_price = Entry::parse(&raw),
            FieldEvent::BuyShares(raw) => {
                self.inputs.buy_shares = Entry::parse(&raw);

                let sell_shares = if self.inputs.sell_shares_touched {
                    clamp_to_bought(
                        std::mem::take(&mut self.inputs.sell_shares),
                        &self.inputs.buy_shares,
                    )
                } else {
                    self.inputs.buy_shares.clone()
                };
                self.inputs.sell_shares = sell_shares;
            }
            FieldEvent::SellShares(raw) => {
                self.inputs.sell_shares = clamp_to_bought(Entry::parse(&raw), &self.inputs.buy_shares);
                self.inputs.sell_shares_touched = true;
            }
            FieldEvent::IncTax(checked) => self.inputs.tax_enabled = checked,
        }

        self.recompute();
    }

    /// Clear the prices and share counts.
    ///
    /// The tax checkbox and the sell shares override are left as they are.
    pub fn reset(&mut self) {
        debug!("form reset");

        self.inputs.buy_price = Entry::Unset;
        self.inputs.sell_price = Entry::Unset;
        self.inputs.buy_shares = Entry::Unset;
        self.inputs.sell_shares = Entry::Unset;

        self.recompute();
    }

    /// Flip the details display and return the new state.
    pub fn toggle_details(&mut self) -> bool {
        self.show_details = !self.show_details;
        self.show_details
    }

    pub fn inputs(&self) -> &TradeInputs {
        &self.inputs
    }

    pub fn outputs(&self) -> &DerivedOutputs {
        &self.outputs
    }

    pub fn show_details(&self) -> bool {
        self.show_details
    }

    fn recompute(&mut self) {
        self.outputs = self.engine.calculate(&self.inputs);
    }
}

/// Caps the requested sell shares at the shares bought.
///
/// Follows plain numeric comparison: an empty buy side counts as zero, and
/// anything that is not a number never compares greater, so it is kept.
/// When capped, the buy entry itself is copied, empty included.
fn clamp_to_bought(
    requested: Entry,
    bought: &Entry,
) -> Entry {
    match (requested.number(), bought.figure()) {
        (Some(wanted), Figure::Value(available)) if wanted > available => bought.clone(),
        _ => requested,
    }
}

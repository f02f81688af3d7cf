//! Text rendering of the shares return form.
//!
//! [`FormEcho`] shows what has been typed into each field and
//! [`ReturnTable`] shows the figures, laid out like the web form's results
//! table.

use std::fmt;

use shares_core::{DerivedOutputs, Entry, FieldName, InputController, TradeInputs};

/// Example value shown in an empty field.
pub fn placeholder(field: FieldName) -> Option<&'static str> {
    match field {
        FieldName::BuyPrice => Some("150"),
        FieldName::BuyShares => Some("500"),
        FieldName::SellPrice => Some("200"),
        FieldName::SellShares => Some("500"),
        FieldName::IncTax => None,
    }
}

/// The form fields with their current contents.
#[derive(Debug, Clone, Copy)]
pub struct FormEcho<'a> {
    inputs: &'a TradeInputs,
    show_details: bool,
}

impl<'a> FormEcho<'a> {
    pub fn new(controller: &'a InputController) -> Self {
        Self {
            inputs: controller.inputs(),
            show_details: controller.show_details(),
        }
    }
}

impl fmt::Display for FormEcho<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_field(f, "Buy price", FieldName::BuyPrice, &self.inputs.buy_price)?;
        write_field(f, "Shares", FieldName::BuyShares, &self.inputs.buy_shares)?;
        write_field(f, "Sell price", FieldName::SellPrice, &self.inputs.sell_price)?;
        write_field(f, "Shares", FieldName::SellShares, &self.inputs.sell_shares)?;

        let mark = if self.inputs.tax_enabled { 'x' } else { ' ' };
        writeln!(f, "[{mark}] Include stamp duty?")?;

        let details = if self.show_details { "Hide" } else { "Show" };
        writeln!(f, "<{details} details>  <Reset>")
    }
}

fn write_field(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    field: FieldName,
    entry: &Entry,
) -> fmt::Result {
    match (entry, placeholder(field)) {
        (Entry::Unset, Some(example)) => writeln!(f, "{label:<12}(e.g. {example})"),
        _ => writeln!(f, "{label:<12}{entry}"),
    }
}

/// The results table.
///
/// Buy and sell totals only appear with details shown, and the stamp duty
/// row only when stamp duty is included.
#[derive(Debug, Clone, Copy)]
pub struct ReturnTable<'a> {
    outputs: &'a DerivedOutputs,
    tax_enabled: bool,
    show_details: bool,
}

impl<'a> ReturnTable<'a> {
    pub fn new(controller: &'a InputController) -> Self {
        Self {
            outputs: controller.outputs(),
            tax_enabled: controller.inputs().tax_enabled,
            show_details: controller.show_details(),
        }
    }
}

impl fmt::Display for ReturnTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.show_details {
            writeln!(f, "{:<12}£{}", "Buy", self.outputs.buy_total)?;
            writeln!(f, "{:<12}£{}", "Sell", self.outputs.sell_total)?;
        }
        if self.tax_enabled {
            writeln!(f, "{:<12}£{}", "Stamp duty", self.outputs.tax_amount)?;
        }
        writeln!(f, "{:<12}£{}", "Return", self.outputs.return_value)?;
        writeln!(f, "{:<12}{}%", "Return (%)", self.outputs.return_percent)
    }
}

/// Renders the whole form: fields, a blank line, then the results.
pub fn render(controller: &InputController) -> String {
    format!("{}\n{}", FormEcho::new(controller), ReturnTable::new(controller))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shares_core::FieldEvent;

    use super::*;

    fn scenario(tax: bool) -> InputController {
        let mut controller = InputController::new();
        controller.on_field_change(FieldEvent::BuyPrice("150".into()));
        controller.on_field_change(FieldEvent::BuyShares("500".into()));
        controller.on_field_change(FieldEvent::SellPrice("200".into()));
        controller.on_field_change(FieldEvent::IncTax(tax));
        controller
    }

    #[test]
    fn table_shows_return_rows_only_by_default() {
        let controller = scenario(false);

        let rendered = ReturnTable::new(&controller).to_string();

        assert_eq!(rendered, "Return      £250.00\nReturn (%)  33.33%\n");
    }

    #[test]
    fn table_shows_stamp_duty_when_included() {
        let controller = scenario(true);

        let rendered = ReturnTable::new(&controller).to_string();

        assert_eq!(
            rendered,
            "Stamp duty  £3.75\nReturn      £246.25\nReturn (%)  32.83%\n"
        );
    }

    #[test]
    fn table_shows_totals_with_details() {
        let mut controller = scenario(false);
        controller.toggle_details();

        let rendered = ReturnTable::new(&controller).to_string();

        assert_eq!(
            rendered,
            "Buy         £750.00\nSell        £1000.00\nReturn      £250.00\nReturn (%)  33.33%\n"
        );
    }

    #[test]
    fn table_prints_not_a_number_literally() {
        let mut controller = scenario(false);
        controller.on_field_change(FieldEvent::BuyShares("lots".into()));

        let rendered = ReturnTable::new(&controller).to_string();

        assert!(rendered.contains("Return      £NaN"));
    }

    #[test]
    fn empty_form_shows_placeholders() {
        let controller = InputController::new();

        let rendered = FormEcho::new(&controller).to_string();

        assert_eq!(
            rendered,
            "Buy price   (e.g. 150)\n\
             Shares      (e.g. 500)\n\
             Sell price  (e.g. 200)\n\
             Shares      (e.g. 500)\n\
             [ ] Include stamp duty?\n\
             <Show details>  <Reset>\n"
        );
    }

    #[test]
    fn filled_form_echoes_values() {
        let mut controller = scenario(true);
        controller.toggle_details();

        let rendered = FormEcho::new(&controller).to_string();

        assert!(rendered.starts_with("Buy price   150\nShares      500\n"));
        assert!(rendered.contains("[x] Include stamp duty?"));
        assert!(rendered.contains("<Hide details>"));
    }

    #[test]
    fn render_joins_form_and_table() {
        let controller = scenario(false);

        let rendered = render(&controller);

        assert!(rendered.contains("<Reset>\n\nReturn      £250.00"));
    }
}

//! CSV loader for recorded form edits.
//!
//! ## CSV Format
//!
//! Two columns, matched by header name. Rows are replayed in file order,
//! exactly as if each had been typed into the form. Headers and field names
//! are trimmed; values are passed on as written.
//!
//! | Column | Required | Notes |
//! |--------|----------|-------|
//! | `field` | yes | `buy_price`, `buy_shares`, `sell_price`, `sell_shares` or `inc_tax` |
//! | `value` | yes | raw field text; empty clears a numeric field; `on`/`off` for `inc_tax` |
//!
//! ### Example
//!
//! ```csv
//! field,value
//! buy_price,150
//! buy_shares,500
//! sell_price,200
//! inc_tax,on
//! ```
use std::path::Path;

use serde::Deserialize;
use shares_core::{FieldError, FieldEvent, InputController};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EventRow {
    field: String,
    value: String,
}

/// Errors that can occur while loading recorded edits.
#[derive(Debug, thiserror::Error)]
pub enum EventLoadError {
    #[error("cannot read event file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad CSV structure or a missing column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, not counting the header.
    #[error("invalid event on row {row}: {source}")]
    InvalidEvent {
        row: usize,
        #[source]
        source: FieldError,
    },
}

/// Parse CSV text into field events, in file order.
///
/// # Errors
///
/// * [`EventLoadError::Parse`] if the CSV is structurally invalid.
/// * [`EventLoadError::InvalidEvent`] if a row names an unknown field or
///   gives `inc_tax` a value that is not a checkbox state.
pub fn load_from_str(input: &str) -> Result<Vec<FieldEvent>, EventLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<EventRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            FieldEvent::parse(&row.field, &row.value)
                .map_err(|source| EventLoadError::InvalidEvent { row: idx + 1, source })
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<FieldEvent>, EventLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Feeds events through the controller in order. Returns how many were applied.
pub fn replay(
    controller: &mut InputController,
    events: impl IntoIterator<Item = FieldEvent>,
) -> usize {
    let mut applied = 0;
    for event in events {
        controller.on_field_change(event);
        applied += 1;
    }
    debug!(applied, "replayed recorded edits");
    applied
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SCENARIO_CSV: &str = "\
field,value
buy_price,150
buy_shares,500
sell_price,200
inc_tax,on
";

    #[test]
    fn load_returns_events_in_file_order() {
        let events = load_from_str(SCENARIO_CSV).unwrap();

        assert_eq!(
            events,
            vec![
                FieldEvent::BuyPrice("150".to_string()),
                FieldEvent::BuyShares("500".to_string()),
                FieldEvent::SellPrice("200".to_string()),
                FieldEvent::IncTax(true),
            ]
        );
    }

    #[test]
    fn empty_value_is_kept_as_empty_text() {
        let events = load_from_str("field,value\nsell_price,\n").unwrap();

        assert_eq!(events, vec![FieldEvent::SellPrice(String::new())]);
    }

    #[test]
    fn whitespace_value_is_not_trimmed() {
        let events = load_from_str(" field , value 
 buy_shares ,   
").unwrap();

        assert_eq!(events, vec![FieldEvent::BuyShares("   ".to_string())]);
    }

    #[test]
    fn unknown_field_reports_row() {
        let csv = "field,value\nbuy_price,150\ncommission,10\n";

        let err = load_from_str(csv).unwrap_err();

        match err {
            EventLoadError::InvalidEvent { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source, FieldError::UnknownField("commission".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_value_column_is_a_parse_error() {
        let err = load_from_str("field\nbuy_price\n").unwrap_err();

        assert!(matches!(err, EventLoadError::Parse(_)));
    }

    #[test]
    fn replay_applies_every_event() {
        let events = load_from_str(SCENARIO_CSV).unwrap();
        let mut controller = InputController::new();

        let applied = replay(&mut controller, events);

        assert_eq!(applied, 4);
        assert_eq!(controller.outputs().buy_total.to_fixed(), "753.75");
        assert_eq!(controller.outputs().return_value.to_fixed(), "246.25");
    }
}

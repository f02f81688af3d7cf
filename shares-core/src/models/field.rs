use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a change event is built from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid checkbox value '{0}' (expected on/off, true/false, yes/no, 1/0 or checked/unchecked)")]
    InvalidCheckbox(String),
}

/// The editable fields on the form, named as the form names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    BuyPrice,
    BuyShares,
    SellPrice,
    SellShares,
    IncTax,
}

impl FieldName {
    /// Form order.
    pub const ALL: [FieldName; 5] = [
        Self::BuyPrice,
        Self::BuyShares,
        Self::SellPrice,
        Self::SellShares,
        Self::IncTax,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuyPrice => "buy_price",
            Self::BuyShares => "buy_shares",
            Self::SellPrice => "sell_price",
            Self::SellShares => "sell_shares",
            Self::IncTax => "inc_tax",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buy_price" => Some(Self::BuyPrice),
            "buy_shares" => Some(Self::BuyShares),
            "sell_price" => Some(Self::SellPrice),
            "sell_shares" => Some(Self::SellShares),
            "inc_tax" => Some(Self::IncTax),
            _ => None,
        }
    }
}

/// A single edit made to the form.
///
/// Numeric fields carry the raw widget text; the checkbox carries its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEvent {
    BuyPrice(String),
    BuyShares(String),
    SellPrice(String),
    SellShares(String),
    IncTax(bool),
}

impl FieldEvent {
    /// Builds an event from a field name and its raw text.
    ///
    /// # Errors
    ///
    /// * [`FieldError::UnknownField`] if `name` is not a form field.
    /// * [`FieldError::InvalidCheckbox`] if `inc_tax` gets text that is not
    ///   a recognised checkbox state.
    pub fn parse(
        name: &str,
        raw: &str,
    ) -> Result<Self, FieldError> {
        let field =
            FieldName::parse(name.trim()).ok_or_else(|| FieldError::UnknownField(name.to_string()))?;

        Ok(match field {
            FieldName::BuyPrice => Self::BuyPrice(raw.to_string()),
            FieldName::BuyShares => Self::BuyShares(raw.to_string()),
            FieldName::SellPrice => Self::SellPrice(raw.to_string()),
            FieldName::SellShares => Self::SellShares(raw.to_string()),
            FieldName::IncTax => Self::IncTax(parse_checkbox(raw)?),
        })
    }

    pub fn field(&self) -> FieldName {
        match self {
            Self::BuyPrice(_) => FieldName::BuyPrice,
            Self::BuyShares(_) => FieldName::BuyShares,
            Self::SellPrice(_) => FieldName::SellPrice,
            Self::SellShares(_) => FieldName::SellShares,
            Self::IncTax(_) => FieldName::IncTax,
        }
    }
}

fn parse_checkbox(raw: &str) -> Result<bool, FieldError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" | "checked" => Ok(true),
        "false" | "off" | "no" | "0" | "unchecked" => Ok(false),
        _ => Err(FieldError::InvalidCheckbox(raw.to_string())),
    }
}

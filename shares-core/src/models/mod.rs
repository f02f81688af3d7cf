mod derived_outputs;
mod entry;
mod field;
mod figure;
mod stamp_duty;
mod trade_inputs;

pub use derived_outputs::DerivedOutputs;
pub use entry::Entry;
pub use field::{FieldError, FieldEvent, FieldName};
pub use figure::Figure;
pub use stamp_duty::StampDuty;
pub use trade_inputs::TradeInputs;

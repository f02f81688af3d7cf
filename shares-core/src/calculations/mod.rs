//! Calculation logic for the shares return form.
//!
//! Shared helpers live in [`common`]; the figures themselves are derived
//! in [`derivation`].

pub mod common;
pub mod derivation;

pub use derivation::{DerivationEngine, recompute_all};

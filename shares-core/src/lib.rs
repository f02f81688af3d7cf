pub mod calculations;
pub mod controller;
pub mod models;

pub use calculations::{DerivationEngine, recompute_all};
pub use controller::InputController;
pub use models::*;

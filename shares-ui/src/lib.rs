pub mod commands;
pub mod event_loader;
pub mod logging;
pub mod view;

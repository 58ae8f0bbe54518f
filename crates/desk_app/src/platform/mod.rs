//! Terminal front-end: wires stdin commands, the core state machine and the backend client.
mod app;
mod effects;
mod logging;
mod settings;
mod ui;

pub use app::run_app;

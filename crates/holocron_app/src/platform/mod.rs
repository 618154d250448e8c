//! Terminal front end: wires stdin, the core state machine, the fetch engine
//! and the results document together.
mod app;
mod cli;
mod config;
mod effects;
mod publish;
mod ui;

pub use app::run_app;

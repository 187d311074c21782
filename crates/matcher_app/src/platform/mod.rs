//! Terminal front-end: wires the pure core to the engine and the console.
mod app;
mod cli;
mod config;
mod effects;
mod report;
mod ui;

pub use app::run_app;

use matcher_core::Msg;

/// Everything the main loop reacts to, in arrival order.
#[derive(Debug)]
pub(crate) enum LoopEvent {
    /// One line of user input.
    Line(String),
    /// The input source reached end of file.
    InputClosed,
    /// A message produced off the main thread (engine completions).
    Msg(Msg),
}

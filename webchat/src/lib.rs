//! Interactive web chat demo over a pluggable text-generation engine.
//!
//! The [`ChatRunner`] owns the conversation and drives whatever
//! [`ChatPolicy`](chat::ChatPolicy) and [`TextEngine`](engine::TextEngine)
//! it was given; [`web`] exposes it over an axum WebSocket front-end.

pub mod logging;
pub mod runner;
pub mod web;

pub use logging::init_logging;
pub use runner::ChatRunner;
pub use web::{AppState, app};

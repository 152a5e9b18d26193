//! Digit Timer - A digit-entry countdown timer served over HTTP
//!
//! This library provides the timer engine (digit entry, duration conversion,
//! tick-driven countdown) and the HTTP surface that drives it.

pub mod config;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerState};
pub use timer::{CountdownController, DigitSequence, EntryPolicy};
pub use api::create_router;
pub use utils::signals::shutdown_signal;

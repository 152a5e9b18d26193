//! Timer engine module
//!
//! Digit entry, duration conversion and the tick-driven countdown.

pub mod controller;
pub mod digits;
pub mod ticker;

// Re-export main types
pub use controller::{Command, CountdownController};
pub use digits::{DigitSequence, EntryPolicy};
pub use ticker::{IntervalTickSource, IntervalTicker, TickEvent, TickHandle, TickSource};

//! Background tasks module
//!
//! This module contains the timer engine task that runs alongside the HTTP server.

pub mod engine;

// Re-export main types
pub use engine::{spawn_engine, EngineError, EngineHandle};

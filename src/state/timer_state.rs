//! Observable timer state published by the countdown controller

use serde::{Deserialize, Serialize};

use crate::timer::DigitSequence;

/// Snapshot of the timer as seen by a display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub is_running: bool,
    /// Entered time while idle, remaining time while running
    pub digits: DigitSequence,
    /// Digits rendered as "HHh MMm SSs"
    pub display: String,
}

impl TimerState {
    /// Create an idle state with nothing entered
    pub fn new() -> Self {
        Self::idle(DigitSequence::new())
    }

    /// Create an idle state showing `digits`
    pub fn idle(digits: DigitSequence) -> Self {
        Self::from_parts(false, digits)
    }

    /// Create a running state showing the remaining time
    pub fn running(digits: DigitSequence) -> Self {
        Self::from_parts(true, digits)
    }

    fn from_parts(is_running: bool, digits: DigitSequence) -> Self {
        Self {
            is_running,
            display: digits.to_string(),
            digits,
        }
    }

    /// Short status label for API responses
    pub fn status(&self) -> &'static str {
        if self.is_running { "running" } else { "idle" }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle_and_empty() {
        let state = TimerState::new();
        assert!(!state.is_running);
        assert!(state.digits.is_empty());
        assert_eq!(state.display, "00h 00m 00s");
        assert_eq!(state.status(), "idle");
    }

    #[test]
    fn test_serializes_digits_as_list() {
        let state = TimerState::running(DigitSequence::from_millis(9_000));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["is_running"], true);
        assert_eq!(json["digits"], serde_json::json!([0, 0, 0, 0, 0, 9]));
        assert_eq!(json["display"], "00h 00m 09s");
    }
}

//! Digit buffer: the entered (or remaining) time as right-aligned digits

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of display positions (hh mm ss).
pub const POSITIONS: usize = 6;

/// Seconds represented by one unit at each position, counted from the right:
/// seconds, tens of seconds, minutes, tens of minutes, hours, tens of hours.
pub const POSITION_WEIGHTS: [u64; POSITIONS] = [1, 10, 60, 600, 3600, 36000];

/// Largest duration the six positions can show (99h 59m 59s).
pub const MAX_SECONDS: u64 = 99 * 3600 + 59 * 60 + 59;

/// Rule deciding when a new digit is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryPolicy {
    /// Refuse once six digits are held, unless the sixth digit from the end is 0.
    /// A leading zero therefore lets a seventh digit in, and a run of zeros
    /// keeps the door open: entering only 0s grows the sequence without bound.
    #[default]
    Compatible,
    /// Refuse once six digits are held.
    Strict,
}

impl EntryPolicy {
    /// Check whether `current` may take another digit
    pub fn accepts(&self, current: &DigitSequence) -> bool {
        match self {
            EntryPolicy::Compatible => {
                current.len() < POSITIONS || current.nth_from_end(POSITIONS - 1) == Some(0)
            }
            EntryPolicy::Strict => current.len() < POSITIONS,
        }
    }
}

/// Ordered digits in entry order; the last digit is the ones of seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigitSequence(Vec<u8>);

impl DigitSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a sequence from raw digits, dropping anything outside 0..=9.
    pub fn from_digits(digits: &[u8]) -> Self {
        Self(digits.iter().copied().filter(|d| *d <= 9).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Digit at `index` counted from the end (0 = last entered)
    pub fn nth_from_end(&self, index: usize) -> Option<u8> {
        self.0.iter().rev().nth(index).copied()
    }

    /// Append under the default entry policy
    #[must_use]
    pub fn append(&self, digit: u8) -> Self {
        self.append_with(digit, EntryPolicy::default())
    }

    /// Append `digit`, returning the sequence unchanged when the policy
    /// refuses it or the digit is not 0..=9.
    #[must_use]
    pub fn append_with(&self, digit: u8, policy: EntryPolicy) -> Self {
        if digit > 9 || !policy.accepts(self) {
            return self.clone();
        }
        let mut digits = self.0.clone();
        digits.push(digit);
        Self(digits)
    }

    #[must_use]
    pub fn remove_last(&self) -> Self {
        let mut digits = self.0.clone();
        digits.pop();
        Self(digits)
    }

    /// Total seconds the sequence stands for. Digits further left than the
    /// sixth from the end carry no weight.
    pub fn to_duration(&self) -> u64 {
        self.0
            .iter()
            .rev()
            .zip(POSITION_WEIGHTS.iter())
            .map(|(digit, weight)| u64::from(*digit) * weight)
            .sum()
    }

    /// Decompose `millis` into exactly six digits, most significant first.
    /// Durations past 99h 59m 59s show as 99h 59m 59s.
    pub fn from_millis(millis: u64) -> Self {
        let mut remaining = (millis / 1000).min(MAX_SECONDS);
        let digits = POSITION_WEIGHTS
            .iter()
            .rev()
            .map(|weight| {
                let digit = remaining / weight;
                remaining -= digit * weight;
                digit as u8
            })
            .collect();
        Self(digits)
    }

    /// The six display positions, most significant first, with missing
    /// leading positions as 0.
    pub fn positions(&self) -> [u8; POSITIONS] {
        let mut positions = [0u8; POSITIONS];
        for (slot, digit) in positions.iter_mut().rev().zip(self.0.iter().rev()) {
            *slot = *digit;
        }
        positions
    }
}

impl fmt::Display for DigitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [th, h, tm, m, ts, s] = self.positions();
        write!(f, "{}{}h {}{}m {}{}s", th, h, tm, m, ts, s)
    }
}

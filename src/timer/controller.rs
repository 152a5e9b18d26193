//! Countdown controller: idle/running state machine over the digit buffer

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    digits::{DigitSequence, EntryPolicy},
    ticker::{TickEvent, TickHandle, TickSource},
};
use crate::state::TimerState;

/// User command accepted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PressDigit(u8),
    Backspace,
    Start,
    Stop,
}

impl Command {
    /// Name used for last-action tracking and logs
    pub fn action(&self) -> &'static str {
        match self {
            Command::PressDigit(_) => "digit",
            Command::Backspace => "backspace",
            Command::Start => "start",
            Command::Stop => "stop",
        }
    }
}

/// Owns the running flag, the digits and at most one tick handle.
///
/// Every operation is defined in every state; inputs that do not apply to
/// the current state leave it untouched.
pub struct CountdownController<S: TickSource> {
    source: S,
    /// Present exactly while running
    ticker: Option<S::Handle>,
    digits: DigitSequence,
    policy: EntryPolicy,
    state_tx: watch::Sender<TimerState>,
}

impl<S: TickSource> CountdownController<S> {
    pub fn new(source: S, policy: EntryPolicy) -> Self {
        let (state_tx, _) = watch::channel(TimerState::new());
        Self {
            source,
            ticker: None,
            digits: DigitSequence::new(),
            policy,
            state_tx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn digits(&self) -> &DigitSequence {
        &self.digits
    }

    pub fn policy(&self) -> EntryPolicy {
        self.policy
    }

    pub fn snapshot(&self) -> TimerState {
        if self.is_running() {
            TimerState::running(self.digits.clone())
        } else {
            TimerState::idle(self.digits.clone())
        }
    }

    /// Receive a snapshot after every completed mutation that changed state
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.state_tx.subscribe()
    }

    /// Active tick handle, if running
    pub fn ticker_mut(&mut self) -> Option<&mut S::Handle> {
        self.ticker.as_mut()
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PressDigit(digit) => self.press_digit(digit),
            Command::Backspace => self.backspace(),
            Command::Start => self.start(),
            Command::Stop => self.stop(),
        }
    }

    pub fn press_digit(&mut self, digit: u8) {
        if self.is_running() {
            debug!("Ignoring digit {} while running", digit);
            return;
        }
        self.digits = self.digits.append_with(digit, self.policy);
        self.publish();
    }

    pub fn backspace(&mut self) {
        if self.is_running() {
            debug!("Ignoring backspace while running");
            return;
        }
        self.digits = self.digits.remove_last();
        self.publish();
    }

    pub fn start(&mut self) {
        if self.is_running() {
            debug!("Start requested while already running");
            return;
        }
        let total_millis = self.digits.to_duration() * 1000;
        debug!("Input {:?} is {} ms", self.digits.as_slice(), total_millis);

        self.ticker = Some(self.source.acquire(total_millis));
        info!("Countdown started for {} s", total_millis / 1000);
        self.publish();
    }

    pub fn stop(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            debug!("Stop requested while idle");
            return;
        };
        ticker.release();
        self.digits = DigitSequence::new();
        info!("Countdown stopped");
        self.publish();
    }

    pub fn on_tick(&mut self, remaining_millis: u64) {
        if !self.is_running() {
            warn!("Tick of {} ms received while idle, ignoring", remaining_millis);
            return;
        }
        self.digits = DigitSequence::from_millis(remaining_millis);
        self.publish();
    }

    pub fn on_finish(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            warn!("Finish received while idle, ignoring");
            return;
        };
        ticker.release();
        self.digits = DigitSequence::from_millis(0);
        info!("Countdown finished");
        self.publish();
    }

    pub fn handle_tick_event(&mut self, event: TickEvent) {
        match event {
            TickEvent::Tick { remaining_millis } => self.on_tick(remaining_millis),
            TickEvent::Finish => self.on_finish(),
        }
    }

    fn publish(&self) {
        let next = self.snapshot();
        self.state_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

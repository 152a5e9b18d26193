//! Tick source contract and the tokio interval implementation

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::debug;

/// Timer time consumed by a single tick.
pub const TICK_MILLIS: u64 = 1000;

const EVENT_BUFFER: usize = 4;

/// Event delivered by an active tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// One tick with the time still left on the countdown
    Tick { remaining_millis: u64 },
    /// The countdown reached zero; sent exactly once, last
    Finish,
}

/// Something that can drive a countdown of a given length.
///
/// Acquiring returns a handle that owns the running countdown. Releasing
/// consumes the handle; once `release` returns no further events may be
/// observed through it.
pub trait TickSource {
    type Handle: TickHandle;

    fn acquire(&mut self, total_millis: u64) -> Self::Handle;
}

pub trait TickHandle {
    fn release(self);
}

/// Tick source backed by `tokio::time::interval`
#[derive(Debug, Clone)]
pub struct IntervalTickSource {
    period: Duration,
}

impl IntervalTickSource {
    /// Create a source whose ticks are `period` apart on the wall clock.
    /// Every tick still counts one second off the countdown.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for IntervalTickSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MILLIS))
    }
}

impl TickSource for IntervalTickSource {
    type Handle = IntervalTicker;

    fn acquire(&mut self, total_millis: u64) -> IntervalTicker {
        let (events_tx, events) = mpsc::channel(EVENT_BUFFER);
        let task = tokio::spawn(run_countdown(total_millis, self.period, events_tx));
        IntervalTicker { events, task }
    }
}

/// Handle to one running interval countdown
#[derive(Debug)]
pub struct IntervalTicker {
    events: mpsc::Receiver<TickEvent>,
    task: JoinHandle<()>,
}

impl IntervalTicker {
    /// Wait for the next event. `None` means the countdown task ended
    /// without finishing.
    pub async fn recv(&mut self) -> Option<TickEvent> {
        self.events.recv().await
    }
}

impl TickHandle for IntervalTicker {
    fn release(self) {
        self.task.abort();
        // Dropping the receiver discards anything the task queued.
        drop(self.events);
    }
}

async fn run_countdown(total_millis: u64, period: Duration, events: mpsc::Sender<TickEvent>) {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut remaining = total_millis;

    loop {
        // The first tick completes immediately.
        ticks.tick().await;

        let event = if remaining == 0 {
            TickEvent::Finish
        } else {
            TickEvent::Tick { remaining_millis: remaining }
        };

        if events.send(event).await.is_err() {
            debug!("Tick receiver dropped, ending countdown task");
            return;
        }
        if event == TickEvent::Finish {
            return;
        }
        remaining = remaining.saturating_sub(TICK_MILLIS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_countdown_emits_ticks_then_finish() {
        let mut source = IntervalTickSource::default();
        let mut ticker = source.acquire(3_000);

        let mut events = Vec::new();
        while let Some(event) = ticker.recv().await {
            events.push(event);
            if event == TickEvent::Finish {
                break;
            }
        }

        assert_eq!(
            events,
            vec![
                TickEvent::Tick { remaining_millis: 3_000 },
                TickEvent::Tick { remaining_millis: 2_000 },
                TickEvent::Tick { remaining_millis: 1_000 },
                TickEvent::Finish,
            ]
        );
        ticker.release();
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_total_finishes_immediately() {
        let mut ticker = IntervalTickSource::default().acquire(0);
        assert_eq!(ticker.recv().await, Some(TickEvent::Finish));
        assert_eq!(ticker.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_are_one_period_apart() {
        let mut source = IntervalTickSource::new(Duration::from_millis(250));
        let mut ticker = source.acquire(5_000);
        let started = tokio::time::Instant::now();

        ticker.recv().await;
        ticker.recv().await;
        assert_eq!(ticker.recv().await, Some(TickEvent::Tick { remaining_millis: 3_000 }));
        assert_eq!(started.elapsed(), Duration::from_millis(500));
        ticker.release();
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_stops_the_task() {
        let mut ticker = IntervalTickSource::default().acquire(60_000);
        ticker.recv().await;
        let task = ticker.task.abort_handle();
        ticker.release();

        for _ in 0..10 {
            if task.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(task.is_finished());
    }
}

//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::TimerState;
use crate::{
    tasks::{EngineError, EngineHandle},
    timer::Command,
};

/// Application state shared by all HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Handle to the timer engine task
    pub engine: EngineHandle,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around a running engine
    pub fn new(engine: EngineHandle, port: u16, host: String) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Forward a command to the engine and record it as the last action
    pub async fn apply(&self, command: Command) -> Result<TimerState, EngineError> {
        let timer = self.engine.send(command).await?;
        info!("Applied {:?}, timer now {} ({})", command, timer.display, timer.status());

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(command.action().to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(timer)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        self.engine.state()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        tasks::spawn_engine,
        timer::{CountdownController, EntryPolicy, IntervalTickSource},
    };

    fn app_state() -> AppState {
        let controller =
            CountdownController::new(IntervalTickSource::default(), EntryPolicy::Compatible);
        let (engine, _) = spawn_engine(controller);
        AppState::new(engine, 0, "127.0.0.1".to_string())
    }

    #[tokio::test]
    async fn test_apply_records_last_action() {
        let state = app_state();
        assert_eq!(state.get_last_action(), (None, None));

        let timer = state.apply(Command::PressDigit(4)).await.unwrap();
        assert_eq!(timer.digits.as_slice(), &[4]);

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("digit"));
        assert!(time.is_some());
        assert_eq!(state.get_timer_state(), timer);
    }

    #[tokio::test]
    async fn test_uptime_starts_in_seconds() {
        let state = app_state();
        assert!(state.get_uptime().ends_with('s'));
    }
}

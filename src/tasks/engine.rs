//! Timer engine task
//!
//! Owns the countdown controller and applies commands and tick events to it
//! one at a time.

use std::future::pending;

use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::{
    state::TimerState,
    timer::{Command, CountdownController, IntervalTickSource, IntervalTicker, TickEvent},
};

const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("timer engine is not running")]
    Closed,
    #[error("timer engine dropped the command before replying")]
    NoReply,
}

struct EngineRequest {
    command: Command,
    reply: oneshot::Sender<TimerState>,
}

enum Input {
    Request(EngineRequest),
    Tick(Option<TickEvent>),
}

/// Cloneable handle used to drive the engine task
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::Sender<EngineRequest>,
    state_rx: watch::Receiver<TimerState>,
}

impl EngineHandle {
    /// Apply a command and return the state right after it was applied
    pub async fn send(&self, command: Command) -> Result<TimerState, EngineError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(EngineRequest { command, reply })
            .await
            .map_err(|_| EngineError::Closed)?;
        response.await.map_err(|_| EngineError::NoReply)
    }

    pub async fn press_digit(&self, digit: u8) -> Result<TimerState, EngineError> {
        self.send(Command::PressDigit(digit)).await
    }

    pub async fn backspace(&self) -> Result<TimerState, EngineError> {
        self.send(Command::Backspace).await
    }

    pub async fn start(&self) -> Result<TimerState, EngineError> {
        self.send(Command::Start).await
    }

    pub async fn stop(&self) -> Result<TimerState, EngineError> {
        self.send(Command::Stop).await
    }

    /// Latest published state
    pub fn state(&self) -> TimerState {
        self.state_rx.borrow().clone()
    }

    /// Watch published states
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.state_rx.clone()
    }
}

impl std::fmt::Debug for EngineRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRequest")
            .field("command", &self.command)
            .finish()
    }
}

/// Spawn the engine task around `controller`.
/// The task ends once every handle has been dropped.
pub fn spawn_engine(
    controller: CountdownController<IntervalTickSource>,
) -> (EngineHandle, JoinHandle<()>) {
    let (commands, requests) = mpsc::channel(COMMAND_BUFFER);
    let handle = EngineHandle {
        commands,
        state_rx: controller.subscribe(),
    };
    let task = tokio::spawn(engine_task(controller, requests));
    (handle, task)
}

async fn next_tick(ticker: Option<&mut IntervalTicker>) -> Option<TickEvent> {
    match ticker {
        Some(ticker) => ticker.recv().await,
        None => pending().await,
    }
}

async fn engine_task(
    mut controller: CountdownController<IntervalTickSource>,
    mut requests: mpsc::Receiver<EngineRequest>,
) {
    info!("Starting timer engine task");

    loop {
        let input = tokio::select! {
            request = requests.recv() => match request {
                Some(request) => Input::Request(request),
                None => break,
            },
            event = next_tick(controller.ticker_mut()) => Input::Tick(event),
        };

        match input {
            Input::Request(EngineRequest { command, reply }) => {
                debug!("Applying command {:?}", command);
                controller.apply(command);
                if reply.send(controller.snapshot()).is_err() {
                    debug!("Caller went away before the reply for {:?}", command);
                }
            }
            Input::Tick(Some(event)) => controller.handle_tick_event(event),
            Input::Tick(None) => {
                error!("Tick source ended without finishing, stopping countdown");
                controller.stop();
            }
        }
    }

    controller.stop();
    info!("Timer engine task finished");
}

//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{state::AppState, timer::Command};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

async fn run_command(
    state: &AppState,
    command: Command,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.apply(command).await {
        Ok(timer) => Ok(Json(ApiResponse::from_timer(message.to_string(), timer))),
        Err(e) => {
            error!("Failed to apply {:?}: {}", command, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /digit/:digit - Append a digit to the entered time
pub async fn digit_handler(
    State(state): State<Arc<AppState>>,
    Path(digit): Path<u8>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Digit endpoint called with {}", digit);
    run_command(&state, Command::PressDigit(digit), "Digit pressed").await
}

/// Handle POST /backspace - Remove the last entered digit
pub async fn backspace_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Backspace endpoint called");
    run_command(&state, Command::Backspace, "Backspace pressed").await
}

/// Handle POST /start - Start counting down the entered time
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Start endpoint called");
    run_command(&state, Command::Start, "Start pressed").await
}

/// Handle POST /stop - Cancel the countdown and clear the time
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Stop endpoint called");
    run_command(&state, Command::Stop, "Stop pressed").await
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_timer_state(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

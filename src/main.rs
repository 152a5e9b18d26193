//! Digit Timer - A digit-entry countdown timer served over HTTP
//!
//! This is the main entry point for the digit-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use digit_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::spawn_engine,
    timer::{CountdownController, IntervalTickSource},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("digit_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting digit-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, entry={:?}",
          config.host, config.port, config.tick_ms, config.entry_policy());

    // Start the timer engine task
    let controller = CountdownController::new(
        IntervalTickSource::new(config.tick_period()),
        config.entry_policy(),
    );
    let (engine, engine_task) = spawn_engine(controller);

    let state = Arc::new(AppState::new(engine, config.port, config.host.clone()));
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /digit/:n   - Enter a digit (0-9)");
    info!("  POST /backspace  - Remove the last digit");
    info!("  POST /start      - Start the countdown");
    info!("  POST /stop       - Stop and clear the countdown");
    info!("  GET  /status     - Current timer and server status");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    // Open connections may still hold engine handles, so don't wait for them.
    engine_task.abort();

    info!("Server shutdown complete");
    Ok(())
}

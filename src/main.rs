//! ChronoCanvas - A countdown timer served over HTTP
//! 
//! This is the main entry point for the chrono-canvas application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use chrono_canvas::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("chrono_canvas={},tower_http=info", config.log_level()))
        .init();

    info!("Starting chrono-canvas server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}s, history_limit={:?}",
          config.host, config.port, config.duration_seconds(), config.history_cap());

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.duration_seconds(),
        config.history_cap(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer          - Rendered timer and recent sessions");
    info!("  POST /timer/start    - Start or resume the countdown");
    info!("  POST /timer/pause    - Pause the countdown");
    info!("  POST /timer/reset    - Rewind to the full duration");
    info!("  POST /timer/duration - Set a custom duration in minutes");
    info!("  POST /timer/preset   - Load a preset by label");
    info!("  GET  /presets        - List presets and rituals");
    info!("  GET  /history        - Full session log");
    info!("  GET  /status         - Timer plus server metadata");
    info!("  GET  /health         - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.shutdown() {
        tracing::error!("Failed to stop countdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}

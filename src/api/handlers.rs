//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{find_preset, AppState, TimerSnapshot, PRESETS};
use crate::view::{PresetView, TimerView};
use super::responses::{
    ApiResponse, DurationRequest, HealthResponse, HistoryResponse, PresetRequest,
    PresetsResponse, StatusResponse,
};

/// Wrap a command result into a JSON response, mapping state errors to 500
fn respond(
    action: &str,
    result: Result<TimerSnapshot, String>,
    message: impl FnOnce(&TimerSnapshot) -> String,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            info!("{} endpoint called - timer is {}", action, snapshot.timer.phase().as_str());
            Ok(Json(ApiResponse::new(message(&snapshot), &snapshot)))
        }
        Err(e) => {
            error!("Failed to handle {} command: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start", state.start(), |_| "Timer started".to_string())
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("pause", state.pause(), |_| "Timer paused".to_string())
}

/// Handle POST /timer/reset - Rewind to the full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", state.reset(), |_| "Timer reset".to_string())
}

/// Handle POST /timer/duration - Set a custom duration in minutes
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond("duration", state.set_duration(request.minutes), |snapshot| {
        format!("Duration set to {} minutes", snapshot.timer.duration / 60)
    })
}

/// Handle POST /timer/preset - Load a preset by label
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PresetRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(preset) = find_preset(&request.label) else {
        warn!("Unknown preset requested: {}", request.label);
        return Err(StatusCode::NOT_FOUND);
    };

    respond("preset", state.load_preset(preset.seconds, preset.label), |_| {
        format!("{} preset loaded", preset.label)
    })
}

/// Handle GET /timer - Return the rendered timer
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerView>, StatusCode> {
    match state.snapshot() {
        Ok(snapshot) => Ok(Json(TimerView::new(&snapshot))),
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /presets - List quick presets and rituals
pub async fn presets_handler() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: PRESETS.iter().map(PresetView::from).collect(),
    })
}

/// Handle GET /history - Return the whole session log, newest first
pub async fn history_handler(State(state): State<Arc<AppState>>) -> Result<Json<HistoryResponse>, StatusCode> {
    match state.history() {
        Ok(events) => Ok(Json(HistoryResponse { events })),
        Err(e) => {
            error!("Failed to get session history: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the timer with server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: TimerView::new(&snapshot),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

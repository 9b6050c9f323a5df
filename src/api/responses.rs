//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{SessionEvent, TimerSnapshot},
    view::{PresetView, TimerView},
};

/// API response structure for timer commands
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    /// Phase the timer is in after the command
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a response describing the timer after a command
    pub fn new(message: String, snapshot: &TimerSnapshot) -> Self {
        Self {
            status: snapshot.timer.phase().as_str().to_string(),
            message,
            timestamp: Utc::now(),
            timer: TimerView::new(snapshot),
        }
    }
}

/// Body of POST /timer/duration
#[derive(Debug, Clone, Deserialize)]
pub struct DurationRequest {
    pub minutes: i64,
}

/// Body of POST /timer/preset
#[derive(Debug, Clone, Deserialize)]
pub struct PresetRequest {
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<PresetView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub events: Vec<SessionEvent>,
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

//! Configuration and CLI argument handling

use std::num::NonZeroUsize;

use clap::Parser;

use crate::state::timer_state::clamp_minutes_to_seconds;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "chrono-canvas")]
#[command(about = "A state-managed HTTP server driving a countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Starting timer duration in minutes (clamped to 1-90)
    #[arg(short, long, default_value = "25", allow_negative_numbers = true)]
    pub minutes: i64,

    /// Keep at most this many session log entries (unbounded when omitted)
    #[arg(long)]
    pub history_limit: Option<NonZeroUsize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Starting duration in seconds after clamping
    pub fn duration_seconds(&self) -> u32 {
        clamp_minutes_to_seconds(self.minutes)
    }

    /// Stored log cap handed to `AppState`
    pub fn history_cap(&self) -> Option<usize> {
        self.history_limit.map(NonZeroUsize::get)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

//! ChronoCanvas - A countdown timer served over HTTP
//! 
//! This library holds the timer state machine, the session log, the
//! one-second countdown task and the JSON view the web page renders.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;

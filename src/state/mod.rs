//! State management module
//! 
//! This module contains the timer state machine, the session log entries,
//! the preset catalogue and the shared application state wrapping them.

pub mod app_state;
pub mod presets;
pub mod session_event;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerSnapshot};
pub use presets::{find_preset, Preset, PresetKind, PRESETS};
pub use session_event::SessionEvent;
pub use timer_state::{TimerPhase, TimerState};

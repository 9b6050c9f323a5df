//! Process-level helpers that sit outside the timer itself

pub mod signals;

pub use signals::shutdown_signal;

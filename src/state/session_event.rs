//! Session log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in the session log, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub id: Uuid,
    pub label: String,
    /// Seconds counted down when the event happened
    pub elapsed: u32,
    /// Session duration in seconds at that moment
    pub target: u32,
    pub timestamp: DateTime<Utc>,
    pub completed: bool,
}

impl SessionEvent {
    pub fn new(label: impl Into<String>, elapsed: u32, target: u32, completed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            elapsed,
            target,
            timestamp: Utc::now(),
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = SessionEvent::new("Session paused", 10, 1500, false);
        let b = SessionEvent::new("Session paused", 10, 1500, false);
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }
}

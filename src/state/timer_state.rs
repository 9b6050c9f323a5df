//! Timer state structure and its transitions
//!
//! Every transition is a pure function from one `TimerState` to the next.
//! Transitions that are worth remembering also hand back a `SessionEvent`
//! for the caller to prepend to the log.

use serde::{Deserialize, Serialize};

use super::SessionEvent;

/// Shortest allowed duration in minutes
pub const MIN_MINUTES: i64 = 1;
/// Longest allowed duration in minutes
pub const MAX_MINUTES: i64 = 90;
/// Duration the timer starts with (25 minutes)
pub const DEFAULT_DURATION_SECONDS: u32 = 25 * 60;

/// Clamp a minute count into the allowed range and convert it to seconds
pub fn clamp_minutes_to_seconds(minutes: i64) -> u32 {
    // Bounded by MAX_MINUTES * 60, so the cast cannot truncate
    (minutes.clamp(MIN_MINUTES, MAX_MINUTES) * 60) as u32
}

/// Where the countdown currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Ready,
    Running,
    Paused,
    Finished,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Ready => "ready",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Finished => "finished",
        }
    }
}

/// Countdown state: target duration, seconds left, and whether it is ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Target length of the session in seconds
    pub duration: u32,
    /// Seconds left, never above `duration`
    pub remaining: u32,
    /// True only while `remaining > 0`
    pub running: bool,
}

impl TimerState {
    /// Create a ready timer for the given duration
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// Seconds already counted down in this session
    pub fn elapsed(&self) -> u32 {
        self.duration.saturating_sub(self.remaining)
    }

    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.remaining == 0 {
            TimerPhase::Finished
        } else if self.remaining == self.duration {
            TimerPhase::Ready
        } else {
            TimerPhase::Paused
        }
    }

    /// Begin or resume counting down; a finished timer reloads first
    pub fn start(self) -> Self {
        let remaining = if self.remaining == 0 {
            self.duration
        } else {
            self.remaining
        };

        Self {
            remaining,
            running: remaining > 0,
            ..self
        }
    }

    /// Stop counting down and record how far the session got
    pub fn pause(self) -> (Self, SessionEvent) {
        let event = SessionEvent::new("Session paused", self.elapsed(), self.duration, false);
        (
            Self {
                running: false,
                ..self
            },
            event,
        )
    }

    /// Stop and rewind to the full duration
    pub fn reset(self) -> Self {
        Self::new(self.duration)
    }

    /// Replace the duration with a named preset
    pub fn load_preset(self, seconds: u32, label: &str) -> (Self, SessionEvent) {
        let event = SessionEvent::new(format!("{} preset loaded", label), 0, seconds, false);
        (Self::new(seconds), event)
    }

    /// Change the duration from a minute count, keeping elapsed time if running
    ///
    /// A running timer whose new duration is already used up finishes on the
    /// spot and reports the completed session.
    pub fn set_duration(self, minutes: i64) -> (Self, Option<SessionEvent>) {
        let seconds = clamp_minutes_to_seconds(minutes);

        if !self.running {
            return (Self::new(seconds), None);
        }

        let remaining = seconds.saturating_sub(self.elapsed());
        let event = (remaining == 0)
            .then(|| SessionEvent::new("Session completed", seconds, seconds, true));
        (
            Self {
                duration: seconds,
                remaining,
                running: remaining > 0,
            },
            event,
        )
    }

    /// Count down one second; reaching zero finishes the session
    pub fn tick(self) -> (Self, Option<SessionEvent>) {
        if !self.running {
            return (self, None);
        }

        if self.remaining <= 1 {
            let event = SessionEvent::new("Session completed", self.duration, self.duration, true);
            return (
                Self {
                    remaining: 0,
                    running: false,
                    ..self
                },
                Some(event),
            );
        }

        (
            Self {
                remaining: self.remaining - 1,
                ..self
            },
            None,
        )
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(duration: u32) -> TimerState {
        TimerState::new(duration).start()
    }

    #[test]
    fn default_is_a_ready_pomodoro() {
        let state = TimerState::default();
        assert_eq!(state.duration, 1500);
        assert_eq!(state.remaining, 1500);
        assert!(!state.running);
        assert_eq!(state.phase(), TimerPhase::Ready);
    }

    #[test]
    fn load_preset_sets_duration_and_stops() {
        for seconds in (60..=5400).step_by(60) {
            let (state, event) = running(1500).tick().0.load_preset(seconds, "Any");
            assert_eq!(state.duration, seconds);
            assert_eq!(state.remaining, seconds);
            assert!(!state.running);
            assert_eq!(event.target, seconds);
            assert_eq!(event.elapsed, 0);
            assert!(!event.completed);
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let worn = running(600).tick().0.tick().0;
        let once = worn.reset();
        let twice = once.reset();
        assert_eq!(once, twice);
        assert_eq!(once.remaining, once.duration);
        assert!(!once.running);
    }

    #[test]
    fn tick_decrements_by_one_until_zero() {
        let mut state = running(120);
        let mut previous = state.remaining;
        while state.running {
            state = state.tick().0;
            assert_eq!(state.remaining, previous - 1);
            previous = state.remaining;
        }
        assert_eq!(state.remaining, 0);
    }

    #[test]
    fn tick_is_ignored_when_not_running() {
        let state = TimerState::new(300);
        let (after, event) = state.tick();
        assert_eq!(after, state);
        assert!(event.is_none());
    }

    #[test]
    fn full_pomodoro_completes_once() {
        let mut state = running(1500);
        let mut completions = Vec::new();
        for _ in 0..1500 {
            let (next, event) = state.tick();
            state = next;
            completions.extend(event);
        }

        assert_eq!(state.remaining, 0);
        assert!(!state.running);
        assert_eq!(state.phase(), TimerPhase::Finished);
        assert_eq!(completions.len(), 1);
        assert!(completions[0].completed);
        assert_eq!(completions[0].elapsed, 1500);
        assert_eq!(completions[0].target, 1500);
        assert_eq!(completions[0].label, "Session completed");
    }

    #[test]
    fn start_after_finish_reloads_duration() {
        let mut state = running(60);
        for _ in 0..60 {
            state = state.tick().0;
        }
        assert_eq!(state.phase(), TimerPhase::Finished);

        let restarted = state.start();
        assert_eq!(restarted.remaining, 60);
        assert!(restarted.running);
    }

    #[test]
    fn pause_records_elapsed_seconds() {
        let mut state = running(1500);
        for _ in 0..10 {
            state = state.tick().0;
        }
        let (paused, event) = state.pause();

        assert_eq!(paused.remaining, 1490);
        assert_eq!(paused.phase(), TimerPhase::Paused);
        assert_eq!(event.label, "Session paused");
        assert_eq!(event.elapsed, 10);
        assert_eq!(event.target, 1500);
        assert!(!event.completed);
    }

    #[test]
    fn preset_then_pause_logs_zero_elapsed() {
        let (state, loaded) = TimerState::default().load_preset(300, "Quick Focus");
        let (state, paused) = state.pause();

        assert_eq!(loaded.label, "Quick Focus preset loaded");
        assert_eq!(state.duration, 300);
        assert_eq!(state.remaining, 300);
        assert_eq!(paused.elapsed, 0);
    }

    #[test]
    fn set_duration_clamps_out_of_range_minutes() {
        let base = running(1500).tick().0;
        for minutes in [-100, -1, 0, 91, 500, i64::MAX, i64::MIN] {
            let clamped = minutes.clamp(MIN_MINUTES, MAX_MINUTES);
            assert_eq!(base.set_duration(minutes).0, base.set_duration(clamped).0);
            assert_eq!(
                TimerState::default().set_duration(minutes).0,
                TimerState::default().set_duration(clamped).0
            );
        }
    }

    #[test]
    fn set_duration_keeps_elapsed_while_running() {
        let mut state = running(1500);
        for _ in 0..30 {
            state = state.tick().0;
        }
        let (changed, event) = state.set_duration(10);

        assert!(event.is_none());
        assert_eq!(changed.duration, 600);
        assert_eq!(changed.remaining, 570);
        assert!(changed.running);
    }

    #[test]
    fn set_duration_resets_when_stopped() {
        let (paused, _) = running(1500).tick().0.pause();
        let (changed, event) = paused.set_duration(45);

        assert!(event.is_none());
        assert_eq!(changed, TimerState::new(2700));
        assert_eq!(changed.phase(), TimerPhase::Ready);
    }

    #[test]
    fn set_duration_below_elapsed_finishes_running_timer() {
        let mut state = running(1500);
        for _ in 0..120 {
            state = state.tick().0;
        }
        let (changed, event) = state.set_duration(1);

        assert_eq!(changed.duration, 60);
        assert_eq!(changed.remaining, 0);
        assert!(!changed.running);
        assert_eq!(changed.phase(), TimerPhase::Finished);

        let event = event.expect("shrinking past elapsed completes the session");
        assert_eq!(event.label, "Session completed");
        assert!(event.completed);
        assert_eq!((event.elapsed, event.target), (60, 60));

        // Nothing left for a later tick to report
        assert!(changed.tick().1.is_none());
    }

    #[test]
    fn set_duration_to_exactly_elapsed_completes() {
        let mut state = running(1500);
        for _ in 0..60 {
            state = state.tick().0;
        }
        let (changed, event) = state.set_duration(1);

        assert_eq!(changed.remaining, 0);
        assert!(event.is_some_and(|e| e.completed));
    }
}

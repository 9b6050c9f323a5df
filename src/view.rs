//! View model for the timer page
//!
//! Turns timer state and log entries into the strings and numbers a front end
//! draws: the `MM:SS` readout, the progress ring, the state caption, the
//! preset bars and the session log rows.

use std::f64::consts::PI;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::state::{
    timer_state::MAX_MINUTES, Preset, PresetKind, SessionEvent, TimerPhase, TimerSnapshot,
    TimerState,
};

/// Radius of the progress ring in view-box units
pub const RING_RADIUS: f64 = 110.0;

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Format seconds as `MM:SS`; minutes are not wrapped at the hour
pub fn format_time(total_seconds: i64) -> String {
    let clamped = total_seconds.max(0);
    format!("{:02}:{:02}", clamped / 60, clamped % 60)
}

/// Wall-clock `HH:MM` in the local time zone
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Fraction of the session already counted down, in `0.0..=1.0`
pub fn progress(timer: &TimerState) -> f64 {
    if timer.duration == 0 {
        return 0.0;
    }
    (timer.elapsed() as f64 / timer.duration as f64).min(1.0)
}

pub fn state_label(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Running => "Timer is counting down",
        TimerPhase::Finished => "Timer finished",
        TimerPhase::Ready => "Timer ready",
        TimerPhase::Paused => "Timer paused",
    }
}

/// Width of a preset's bar relative to the longest allowed duration
pub fn preset_bar_percent(seconds: u32) -> f64 {
    (seconds as f64 / (MAX_MINUTES * 60) as f64 * 100.0).min(100.0)
}

/// Round seconds to the nearest whole minute, as the duration controls show it
pub fn rounded_minutes(seconds: u32) -> u32 {
    (seconds + 30) / 60
}

/// One row of the session log
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub id: Uuid,
    pub label: String,
    /// e.g. `10:00 taken · target 25:00`
    pub summary: String,
    pub time: String,
    pub completed: bool,
}

impl From<&SessionEvent> for EventView {
    fn from(event: &SessionEvent) -> Self {
        Self {
            id: event.id,
            label: event.label.clone(),
            summary: format!(
                "{} taken · target {}",
                format_time(event.elapsed.into()),
                format_time(event.target.into())
            ),
            time: format_timestamp(&event.timestamp),
            completed: event.completed,
        }
    }
}

/// Everything the timer card and the session log render
#[derive(Debug, Clone, Serialize)]
pub struct TimerView {
    pub phase: TimerPhase,
    pub label: &'static str,
    pub running: bool,
    pub duration_seconds: u32,
    pub remaining_seconds: u32,
    pub elapsed_seconds: u32,
    /// `MM:SS` of the remaining time
    pub remaining: String,
    pub progress: f64,
    pub percent: u32,
    /// Stroke dash offset for the progress ring
    pub dash_offset: f64,
    /// Value shown by the slider and minutes field
    pub duration_minutes: u32,
    pub events: Vec<EventView>,
    pub total_events: usize,
}

impl TimerView {
    pub fn new(snapshot: &TimerSnapshot) -> Self {
        let timer = &snapshot.timer;
        let phase = timer.phase();
        let progress = progress(timer);

        Self {
            phase,
            label: state_label(phase),
            running: timer.running,
            duration_seconds: timer.duration,
            remaining_seconds: timer.remaining,
            elapsed_seconds: timer.elapsed(),
            remaining: format_time(timer.remaining.into()),
            progress,
            percent: (progress * 100.0).round() as u32,
            dash_offset: ring_circumference() * (1.0 - progress),
            duration_minutes: rounded_minutes(timer.duration),
            events: snapshot.recent.iter().map(EventView::from).collect(),
            total_events: snapshot.total_events,
        }
    }
}

/// A preset button or ritual card
#[derive(Debug, Clone, Serialize)]
pub struct PresetView {
    pub label: &'static str,
    pub kind: PresetKind,
    pub seconds: u32,
    pub minutes: u32,
    pub description: Option<&'static str>,
    pub bar_percent: f64,
}

impl From<&Preset> for PresetView {
    fn from(preset: &Preset) -> Self {
        Self {
            label: preset.label,
            kind: preset.kind,
            seconds: preset.seconds,
            minutes: rounded_minutes(preset.seconds),
            description: preset.description,
            bar_percent: preset_bar_percent(preset.seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(timer: TimerState, recent: Vec<SessionEvent>) -> TimerSnapshot {
        let total_events = recent.len();
        TimerSnapshot {
            timer,
            recent,
            total_events,
        }
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(5400), "90:00");
        assert_eq!(format_time(-5), "00:00");
    }

    #[test]
    fn ready_timer_view() {
        let view = TimerView::new(&snapshot(TimerState::default(), Vec::new()));
        assert_eq!(view.label, "Timer ready");
        assert_eq!(view.remaining, "25:00");
        assert_eq!(view.percent, 0);
        assert!((view.dash_offset - ring_circumference()).abs() < 1e-9);
        assert_eq!(view.duration_minutes, 25);
    }

    #[test]
    fn paused_halfway_view() {
        let timer = TimerState {
            duration: 600,
            remaining: 300,
            running: false,
        };
        let view = TimerView::new(&snapshot(timer, Vec::new()));
        assert_eq!(view.phase, TimerPhase::Paused);
        assert_eq!(view.label, "Timer paused");
        assert_eq!(view.percent, 50);
        assert!((view.dash_offset - ring_circumference() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn finished_view_is_full_ring() {
        let timer = TimerState {
            duration: 60,
            remaining: 0,
            running: false,
        };
        let view = TimerView::new(&snapshot(timer, Vec::new()));
        assert_eq!(view.label, "Timer finished");
        assert_eq!(view.percent, 100);
        assert!(view.dash_offset.abs() < 1e-9);
    }

    #[test]
    fn zero_duration_has_no_progress() {
        assert_eq!(progress(&TimerState::new(0)), 0.0);
    }

    #[test]
    fn event_rows_summarize_elapsed_and_target() {
        let event = SessionEvent::new("Session paused", 600, 1500, false);
        let view = TimerView::new(&snapshot(TimerState::default(), vec![event]));
        assert_eq!(view.events[0].summary, "10:00 taken · target 25:00");
        assert_eq!(view.events[0].time.len(), 5);
    }

    #[test]
    fn preset_bars_scale_to_ninety_minutes() {
        assert!((preset_bar_percent(2700) - 50.0).abs() < 1e-9);
        assert_eq!(preset_bar_percent(5400), 100.0);
        assert_eq!(preset_bar_percent(9000), 100.0);
    }
}

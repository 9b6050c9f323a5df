//! Main application state management

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use super::{SessionEvent, TimerState};
use crate::tasks::countdown_task;

/// Number of log entries the view shows
pub const RECENT_EVENTS: usize = 6;

/// Handle to the countdown task currently allowed to tick
#[derive(Debug, Default)]
struct Ticker {
    /// Bumped every time a countdown is armed or cancelled
    epoch: u64,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    fn cancel(&mut self) {
        self.epoch += 1;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Timer state together with the newest log entries
#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub timer: TimerState,
    /// Newest first, at most `RECENT_EVENTS` long
    pub recent: Vec<SessionEvent>,
    pub total_events: usize,
}

/// Main application state that owns the timer, its log and its countdown task
///
/// Locks are always taken in the order timer, ticker, history.
#[derive(Debug)]
pub struct AppState {
    timer: Mutex<TimerState>,
    ticker: Mutex<Ticker>,
    /// Session log, newest first
    history: Mutex<VecDeque<SessionEvent>>,
    /// Optional cap on the stored log; `None` keeps everything
    pub history_limit: Option<usize>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a ready timer of `duration` seconds with an empty log
    pub fn new(port: u16, host: String, duration: u32, history_limit: Option<usize>) -> Self {
        let timer = TimerState::new(duration);
        let (timer_update_tx, timer_update_rx) = watch::channel(timer);

        Self {
            timer: Mutex::new(timer),
            ticker: Mutex::new(Ticker::default()),
            history: Mutex::new(VecDeque::new()),
            history_limit,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a transition, log its event, and arm or cancel the countdown to match
    fn apply<F>(self: &Arc<Self>, action: &str, transition: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(TimerState) -> (TimerState, Option<SessionEvent>),
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let before = *timer;
        let (after, event) = transition(before);

        // Only commit once the countdown matches the new running flag
        match (before.running, after.running) {
            (false, true) => self.arm_countdown()?,
            (true, false) => self.cancel_countdown()?,
            _ => {}
        }
        *timer = after;

        let completed = event.as_ref().is_some_and(|event| event.completed);
        if let Some(event) = event {
            self.record(event)?;
        }
        drop(timer);

        self.touch_last_action(if completed { "complete" } else { action });
        self.publish(after);
        self.snapshot_of(after)
    }

    /// Spawn a fresh countdown task, replacing any live one
    fn arm_countdown(self: &Arc<Self>) -> Result<(), String> {
        let mut ticker = self.ticker.lock()
            .map_err(|e| format!("Failed to lock countdown ticker: {}", e))?;

        ticker.cancel();
        let epoch = ticker.epoch;
        let first_tick = tokio::time::Instant::now() + Duration::from_secs(1);
        ticker.handle = Some(tokio::spawn(countdown_task(Arc::clone(self), epoch, first_tick)));

        debug!("Countdown armed with epoch {}", epoch);
        Ok(())
    }

    fn cancel_countdown(&self) -> Result<(), String> {
        let mut ticker = self.ticker.lock()
            .map_err(|e| format!("Failed to lock countdown ticker: {}", e))?;

        ticker.cancel();
        debug!("Countdown cancelled, epoch now {}", ticker.epoch);
        Ok(())
    }

    /// Prepend an event to the log, honouring the history limit
    fn record(&self, event: SessionEvent) -> Result<(), String> {
        let mut history = self.history.lock()
            .map_err(|e| format!("Failed to lock session history: {}", e))?;

        info!("Session event: {} ({}s of {}s)", event.label, event.elapsed, event.target);
        history.push_front(event);
        if let Some(limit) = self.history_limit {
            history.truncate(limit);
        }
        Ok(())
    }

    fn touch_last_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, timer: TimerState) {
        // Notify timer state watchers
        if let Err(e) = self.timer_update_tx.send(timer) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    fn snapshot_of(&self, timer: TimerState) -> Result<TimerSnapshot, String> {
        let history = self.history.lock()
            .map_err(|e| format!("Failed to lock session history: {}", e))?;

        Ok(TimerSnapshot {
            timer,
            recent: history.iter().take(RECENT_EVENTS).cloned().collect(),
            total_events: history.len(),
        })
    }

    /// Start or resume the countdown
    pub fn start(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        info!("Starting timer");
        self.apply("start", |timer| (timer.start(), None))
    }

    /// Pause the countdown and log how far it got
    pub fn pause(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        info!("Pausing timer");
        self.apply("pause", |timer| {
            let (timer, event) = timer.pause();
            (timer, Some(event))
        })
    }

    /// Stop and rewind to the full duration
    pub fn reset(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        info!("Resetting timer");
        self.apply("reset", |timer| (timer.reset(), None))
    }

    /// Load a named duration, stopping any countdown
    pub fn load_preset(self: &Arc<Self>, seconds: u32, label: &str) -> Result<TimerSnapshot, String> {
        info!("Loading preset {} ({}s)", label, seconds);
        self.apply("preset", |timer| {
            let (timer, event) = timer.load_preset(seconds, label);
            (timer, Some(event))
        })
    }

    /// Change the duration from a minute count, clamped to the allowed range
    pub fn set_duration(self: &Arc<Self>, minutes: i64) -> Result<TimerSnapshot, String> {
        info!("Setting duration to {} minutes", minutes);
        self.apply("duration", |timer| timer.set_duration(minutes))
    }

    /// Apply one countdown second on behalf of the task armed with `epoch`
    ///
    /// Returns whether the countdown should keep ticking. Ticks from a
    /// cancelled or replaced task are ignored.
    pub fn tick(&self, epoch: u64) -> Result<bool, String> {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        let mut ticker = self.ticker.lock()
            .map_err(|e| format!("Failed to lock countdown ticker: {}", e))?;

        if ticker.epoch != epoch {
            debug!("Ignoring stale tick from epoch {} (current {})", epoch, ticker.epoch);
            return Ok(false);
        }

        let (after, event) = timer.tick();
        *timer = after;

        if !after.running {
            // The finishing task exits on its own; just retire its epoch
            ticker.epoch += 1;
            ticker.handle = None;
        }
        drop(ticker);

        if let Some(event) = event {
            info!("Timer finished after {}s", event.elapsed);
            self.record(event)?;
            self.touch_last_action("complete");
        }
        drop(timer);

        self.publish(after);
        Ok(after.running)
    }

    /// Cancel any live countdown, used when the server shuts down
    pub fn shutdown(&self) -> Result<(), String> {
        info!("Stopping countdown for shutdown");
        self.cancel_countdown()
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer.lock()
            .map(|timer| *timer)
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Current timer state with the newest log entries
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        let timer = self.get_timer_state()?;
        self.snapshot_of(timer)
    }

    /// The whole stored log, newest first
    pub fn history(&self) -> Result<Vec<SessionEvent>, String> {
        self.history.lock()
            .map(|history| history.iter().cloned().collect())
            .map_err(|e| format!("Failed to lock session history: {}", e))
    }

    /// Subscribe to timer state changes
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    #[cfg(test)]
    fn live_countdown(&self) -> (u64, bool) {
        let ticker = self.ticker.lock().unwrap();
        let live = ticker.handle.as_ref().is_some_and(|h| !h.is_finished());
        (ticker.epoch, live)
    }
}

//! Countdown background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error};

use crate::state::AppState;

/// Tick the timer once per second until it stops or this task is replaced
///
/// Spawned by `AppState` whenever the timer starts running and aborted when
/// it stops. `epoch` identifies this task to `AppState::tick`, which ignores
/// ticks from any task that is no longer current.
pub async fn countdown_task(state: Arc<AppState>, epoch: u64, first_tick: Instant) {
    debug!("Countdown task {} started", epoch);

    let mut interval = interval_at(first_tick, Duration::from_secs(1));

    loop {
        interval.tick().await;

        match state.tick(epoch) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!("Failed to apply countdown tick: {}", e);
                break;
            }
        }
    }

    debug!("Countdown task {} finished", epoch);
}

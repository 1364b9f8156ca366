use tokio::time::{MissedTickBehavior, interval};

use super::messages::PositionUpdate;
use super::state::AppState;

/// Spawns the background ticker unless one is already running.
pub fn ensure_started(state: &AppState) {
    if !state.claim_ticker() {
        return;
    }
    tracing::info!(interval = ?state.tick_interval(), "starting position ticker");
    tokio::spawn(run(state.clone()));
}

async fn run(state: AppState) {
    let mut ticks = interval(state.tick_interval());
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticks.tick().await;
        tick_once(&state);
    }
}

/// Steps the clock once and broadcasts the result.
pub fn tick_once(state: &AppState) -> PositionUpdate {
    let update: PositionUpdate = {
        let mut clock = state.clock();
        clock.step();
        clock.snapshot().into()
    };

    if let Err(e) = state.updates().send(update.clone()) {
        tracing::trace!("no listeners for position update: {e}");
    }
    update
}

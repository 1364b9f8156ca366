use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use tokio::sync::broadcast;

use super::messages::PositionUpdate;
use crate::cfg::ServerConfig;
use crate::sim::clock::{ClockSettings, OrbitClock};
use crate::sim::registry::Registry;

/// State shared by every request handler, socket and the ticker.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Shared>,
}

struct Shared {
    registry: Arc<Registry>,
    clock: Mutex<OrbitClock>,
    updates: broadcast::Sender<PositionUpdate>,
    ticker_started: AtomicBool,
    tick_interval: Duration,
}

impl AppState {
    pub fn new(
        registry: Arc<Registry>,
        clock: ClockSettings,
        tick_interval: Duration,
        broadcast_capacity: usize,
    ) -> Self {
        let (updates, _) = broadcast::channel(broadcast_capacity.max(1));
        Self {
            inner: Arc::new(Shared {
                clock: Mutex::new(OrbitClock::new(registry.clone(), clock)),
                registry,
                updates,
                ticker_started: AtomicBool::new(false),
                tick_interval,
            }),
        }
    }

    /// Builds the state for the compiled-in solar system.
    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self::new(
            Arc::new(crate::sim::solar_system()),
            ClockSettings {
                step_size: cfg.step_size,
                time_scale: cfg.time_scale,
            },
            Duration::from_millis(cfg.tick_interval_ms.max(1)),
            cfg.broadcast_capacity,
        )
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Locks the clock. Never hold the guard across an `.await`.
    pub fn clock(&self) -> MutexGuard<'_, OrbitClock> {
        self.inner.clock.lock()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PositionUpdate> {
        self.inner.updates.subscribe()
    }

    pub(super) fn updates(&self) -> &broadcast::Sender<PositionUpdate> {
        &self.inner.updates
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        self.inner.tick_interval
    }

    /// Marks the ticker as started. Returns `true` only for the first caller.
    pub(super) fn claim_ticker(&self) -> bool {
        self.inner
            .ticker_started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn ticker_started(&self) -> bool {
        self.inner.ticker_started.load(Ordering::Acquire)
    }
}

//! Ticker for scheduling repeated callbacks with cancellation support.
//!
//! Runs a callback after an initial delay and then on a regular interval
//! until cancelled. The first tick fires one full interval after the initial
//! delay has elapsed.

use std::{collections::HashMap, sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{
    runtime::Handle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Minimal ticker core keyed by id. Starting an id that is already running
/// replaces it.
#[derive(Clone)]
pub struct Ticker {
    /// Runtime the tick tasks are spawned on.
    runtime: Handle,
    /// Cancellation token per running id.
    entries: Arc<Mutex<HashMap<String, CancellationToken>>>,
}

impl Ticker {
    /// Create a ticker that spawns on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a ticker on the ambient tokio runtime, if there is one.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Check if a ticker is active for the given id.
    pub fn is_active(&self, id: &str) -> bool {
        self.entries.lock().contains_key(id)
    }

    /// Start or replace a ticker for `id` with given timings and `on_tick` closure.
    pub fn start<F>(&self, id: &str, initial: Duration, interval: Duration, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop(id);

        let token = CancellationToken::new();
        let cancel = token.clone();
        let id_for_log = id.to_string();

        let fut = async move {
            trace!(
                "ticker_start" = %id_for_log,
                init_ms = initial.as_millis(),
                int_ms = interval.as_millis()
            );

            tokio::select! {
                _ = time::sleep(initial) => {}
                _ = cancel.cancelled() => {
                    trace!("ticker_cancelled_initial" = %id_for_log);
                    return;
                }
            }

            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        trace!("ticker_cancelled" = %id_for_log);
                        return;
                    }
                    _ = ticker.tick() => {
                        on_tick();
                    }
                }
            }
        };

        self.runtime.spawn(fut);
        self.entries.lock().insert(id.to_string(), token);
    }

    /// Stop a ticker if present (non-blocking).
    pub fn stop(&self, id: &str) {
        if let Some(token) = self.entries.lock().remove(id) {
            token.cancel();
            trace!("ticker_stop" = %id);
        }
    }

    /// Cancel every running ticker (non-blocking).
    pub fn clear(&self) {
        let tokens: Vec<CancellationToken> = {
            let mut map = self.entries.lock();
            map.drain().map(|(_, t)| t).collect()
        };
        for t in &tokens {
            t.cancel();
        }
        if !tokens.is_empty() {
            trace!(count = tokens.len(), "ticker_clear");
        }
    }
}

//! Hold-to-repeat for navigation chords.
//!
//! The first step of a held chord is the ordinary dispatch. After the initial
//! delay a ticker task sends one tick per interval over a channel. Ticks are
//! only turned into dispatches when the host pumps them, so handlers stay on
//! the host thread. Every start bumps a generation number and ticks from
//! older generations are dropped.

use keybinds::{Action, HoldRepeatConfig};
use keytoken::Key;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

use crate::ticker::Ticker;

/// Ticker id used for the single hold-repeat slot.
const HOLD_TICKER_ID: &str = "hold-repeat";

/// One timer tick, tagged with the generation that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RepeatTick {
    /// Generation of the hold this tick belongs to.
    generation: u64,
    /// Action to repeat.
    action: Action,
}

/// The key currently driving repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Held {
    /// Token of the held key; its keyup stops the repeat.
    key: Key,
    /// Action being repeated.
    action: Action,
    /// Generation assigned at start.
    generation: u64,
}

/// Repeats a dispatched navigation action while its key stays down.
pub struct HoldRepeater {
    /// Timing configuration.
    config: HoldRepeatConfig,
    /// Timer backend; `None` when no tokio runtime was available.
    ticker: Option<Ticker>,
    /// Sender cloned into each tick task.
    tx: UnboundedSender<RepeatTick>,
    /// Ticks waiting to be pumped.
    rx: UnboundedReceiver<RepeatTick>,
    /// Last generation handed out.
    generation: u64,
    /// Active hold, if any.
    held: Option<Held>,
}

impl HoldRepeater {
    /// Create a repeater on the ambient tokio runtime.
    ///
    /// Without a runtime (or with `enabled: false`) the repeater never fires.
    pub fn new(config: HoldRepeatConfig) -> Self {
        let ticker = if config.enabled {
            let t = Ticker::try_current();
            if t.is_none() {
                debug!("no tokio runtime; hold-repeat disabled");
            }
            t
        } else {
            None
        };
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            config,
            ticker,
            tx,
            rx,
            generation: 0,
            held: None,
        }
    }

    /// True when repeats can actually be scheduled.
    pub fn is_available(&self) -> bool {
        self.ticker.is_some()
    }

    /// Begin repeating `action` while `key` stays down. Replaces any active hold.
    pub fn start(&mut self, action: Action, key: Key) {
        self.stop();
        let Some(ticker) = &self.ticker else {
            return;
        };
        self.generation += 1;
        let generation = self.generation;
        self.held = Some(Held {
            key,
            action,
            generation,
        });
        let tx = self.tx.clone();
        ticker.start(
            HOLD_TICKER_ID,
            self.config.initial_delay(),
            self.config.interval(),
            move || {
                // The receiver only goes away with the repeater, which cancels us.
                let _ignored = tx.send(RepeatTick { generation, action });
            },
        );
        debug!(action = %action, key = %key, generation, "hold repeat start");
    }

    /// Stop the active hold, if any.
    pub fn stop(&mut self) {
        if let Some(held) = self.held.take() {
            if let Some(ticker) = &self.ticker {
                ticker.stop(HOLD_TICKER_ID);
            }
            debug!(action = %held.action, generation = held.generation, "hold repeat stop");
        }
    }

    /// Key driving the active hold.
    pub fn held_key(&self) -> Option<Key> {
        self.held.map(|h| h.key)
    }

    /// True while a hold is active.
    pub fn is_active(&self) -> bool {
        self.held.is_some()
    }

    /// Take every pending tick of the active hold, dropping stale ones.
    pub fn drain(&mut self) -> Vec<Action> {
        let current = self.held.map(|h| h.generation);
        let mut out = Vec::new();
        while let Ok(tick) = self.rx.try_recv() {
            if Some(tick.generation) == current {
                out.push(tick.action);
            } else {
                trace!(generation = tick.generation, "stale repeat tick dropped");
            }
        }
        out
    }
}

impl Drop for HoldRepeater {
    fn drop(&mut self) {
        if let Some(ticker) = &self.ticker {
            ticker.clear();
        }
    }
}

//! Hotkey Engine
//!
//! Turns raw keyboard and pointer events into dispatched tree actions:
//! - normalizes events to layout-independent tokens (`keytoken`)
//! - tracks held keys and recognizes chords and solo-modifier taps
//! - resolves combos against the binding table (`keybinds`)
//! - suspends itself in text fields and during modal edit sessions
//! - captures new bindings in custom mode
//! - repeats held navigation chords
//!
//! The engine is single-threaded: every handler runs to completion on the
//! caller's thread and returns an [`Outcome`]. The only background work is
//! the hold-repeat timer, whose ticks are delivered by
//! [`HotkeyEngine::pump_repeats`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

mod capture;
mod error;
mod guard;
mod outcome;
mod repeater;
pub mod test_support;
mod ticker;
mod tracker;

use keybinds::{BindingTable, EngineConfig, HoldRepeatConfig, resolve};
use keytoken::{
    Combo, InputEvent, Key, KeyEvent, KeyEventKind, Modifier, Platform, PointerEvent, Visibility,
};
use tracing::{debug, trace};

pub use capture::{BindingCapture, CaptureStep};
pub use error::{Error, Result};
pub use guard::{EditModeGuard, FocusTarget, ModalLock, ModalSession};
pub use keybinds::{Action, HotkeyMode};
pub use outcome::Outcome;
pub use repeater::HoldRepeater;
pub use ticker::Ticker;
pub use tracker::{ChordState, ChordTracker, TrackStep};

/// Callback invoked with the dispatch context (a row id, when known).
pub type Handler = Box<dyn FnMut(Option<&str>)>;

/// The hotkey engine.
///
/// Construct via [`HotkeyEngine::new`] or [`HotkeyEngine::from_config`],
/// register handlers with [`HotkeyEngine::on`], then feed events through
/// [`HotkeyEngine::handle_event`] (or the per-event `handle_*` methods).
pub struct HotkeyEngine {
    /// Action → combo table.
    bindings: BindingTable,
    /// Platform used for display labels.
    platform: Platform,
    /// Builtin or custom.
    mode: HotkeyMode,
    /// Held-key state.
    tracker: ChordTracker,
    /// What has keyboard focus.
    focus: FocusTarget,
    /// Current tree selection.
    selection: Option<String>,
    /// Engine-owned lock for exclusive editing sessions.
    modal: ModalLock,
    /// Host-injected guards.
    guards: Vec<Box<dyn EditModeGuard>>,
    /// Active binding capture.
    capture: Option<BindingCapture>,
    /// Registered action handlers.
    handlers: HashMap<Action, Vec<Handler>>,
    /// Hold-to-repeat driver.
    repeater: HoldRepeater,
}

impl HotkeyEngine {
    /// Create an engine with the given bindings and default timings.
    ///
    /// Hold-repeat is only available when called inside a tokio runtime.
    pub fn new(bindings: BindingTable, platform: Platform) -> Self {
        Self::with_parts(bindings, platform, HotkeyMode::Builtin, HoldRepeatConfig::default())
    }

    /// Build an engine from a loaded configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let bindings = config.binding_table()?;
        Ok(Self::with_parts(
            bindings,
            config.platform(),
            config.mode,
            config.hold_repeat,
        ))
    }

    /// Shared constructor.
    fn with_parts(
        bindings: BindingTable,
        platform: Platform,
        mode: HotkeyMode,
        hold: HoldRepeatConfig,
    ) -> Self {
        debug!(platform = ?platform, mode = %mode, "hotkey engine created");
        Self {
            bindings,
            platform,
            mode,
            tracker: ChordTracker::new(),
            focus: FocusTarget::None,
            selection: None,
            modal: ModalLock::new(),
            guards: Vec::new(),
            capture: None,
            handlers: HashMap::new(),
            repeater: HoldRepeater::new(hold),
        }
    }

    // ---- dispatch ---------------------------------------------------------

    /// Register a handler for `action`. Handlers run in registration order.
    pub fn on<F>(&mut self, action: Action, handler: F)
    where
        F: FnMut(Option<&str>) + 'static,
    {
        self.handlers.entry(action).or_default().push(Box::new(handler));
    }

    /// Run the handlers for `action` with `context`.
    ///
    /// Returns false without running anything in custom mode, where tree
    /// dispatch is suspended.
    pub fn dispatch(&mut self, action: Action, context: Option<&str>) -> bool {
        if self.mode.suspends_dispatch() {
            debug!(action = %action, "dispatch suppressed in custom mode");
            return false;
        }
        debug!(action = %action, context = context.unwrap_or("-"), "dispatch");
        if let Some(handlers) = self.handlers.get_mut(&action) {
            for h in handlers.iter_mut() {
                h(context);
            }
        }
        true
    }

    /// Focused row, else the selection.
    fn context(&self) -> Option<String> {
        self.focus
            .row_id()
            .map(str::to_string)
            .or_else(|| self.selection.clone())
    }

    // ---- events -----------------------------------------------------------

    /// Feed any input event.
    pub fn handle_event(&mut self, ev: &InputEvent) -> Outcome {
        match ev {
            InputEvent::Key(k) => match k.kind {
                KeyEventKind::Down => self.handle_key_down(k),
                KeyEventKind::Up => self.handle_key_up(k),
            },
            InputEvent::Pointer(p) => self.handle_pointer_down(p),
            InputEvent::Blur => self.handle_blur(),
            InputEvent::Focus => self.handle_focus(),
            InputEvent::Visibility(v) => self.handle_visibility(*v),
        }
    }

    /// `keydown`.
    pub fn handle_key_down(&mut self, ev: &KeyEvent) -> Outcome {
        if let Some(capture) = &self.capture {
            let step = capture.on_key_down(ev);
            return self.apply_capture_step(step);
        }
        if self.check_suspended() {
            return Outcome::Pass;
        }
        if ev.repeat {
            return Outcome::Pass;
        }
        let Some(token) = ev.token() else {
            return Outcome::Pass;
        };
        match self.tracker.key_down(&ev.code, token, ev.modifiers) {
            TrackStep::Chord(combo) => {
                self.repeater.stop();
                self.fire_chord(&combo, token)
            }
            TrackStep::Idle | TrackStep::Solo(_) => Outcome::Tracked,
        }
    }

    /// `keyup`.
    pub fn handle_key_up(&mut self, ev: &KeyEvent) -> Outcome {
        if self.capture.is_some() {
            return Outcome::Swallowed;
        }
        if self.check_suspended() {
            return Outcome::Pass;
        }
        let Some(token) = ev.token() else {
            return Outcome::Pass;
        };
        if token.is_modifier() || self.repeater.held_key() == Some(token) {
            self.repeater.stop();
        }
        match self.tracker.key_up(&ev.code, token) {
            TrackStep::Solo(m) => self.fire_solo(m),
            TrackStep::Idle | TrackStep::Chord(_) => Outcome::Tracked,
        }
    }

    /// Primary-button `mousedown` on `ev.target`.
    pub fn handle_pointer_down(&mut self, ev: &PointerEvent) -> Outcome {
        if let Some(capture) = &self.capture {
            let step = capture.on_pointer_down(ev);
            return self.apply_capture_step(step);
        }
        if self.check_suspended() {
            return Outcome::Pass;
        }
        let combo = ev.combo();
        let Some(action) = resolve(&self.bindings, &combo) else {
            return Outcome::Pass;
        };
        let context = ev.target.clone().or_else(|| self.context());
        if !self.dispatch(action, context.as_deref()) {
            return Outcome::Pass;
        }
        Outcome::Dispatched(action)
    }

    /// Window `blur`: hard reset, cancels any capture.
    pub fn handle_blur(&mut self) -> Outcome {
        trace!("blur");
        self.hard_reset(true)
    }

    /// Window `focus`: hard reset.
    pub fn handle_focus(&mut self) -> Outcome {
        trace!("focus");
        self.hard_reset(false)
    }

    /// `visibilitychange`: hidden is a hard reset, cancelling any capture.
    pub fn handle_visibility(&mut self, v: Visibility) -> Outcome {
        match v {
            Visibility::Hidden => {
                trace!("hidden");
                self.hard_reset(true)
            }
            Visibility::Visible => Outcome::Pass,
        }
    }

    /// Resolve and dispatch a completed keyboard chord.
    fn fire_chord(&mut self, combo: &Combo, token: Key) -> Outcome {
        let Some(action) = resolve(&self.bindings, combo) else {
            trace!(combo = %combo, "no binding");
            return Outcome::Tracked;
        };
        let context = self.context();
        if !self.dispatch(action, context.as_deref()) {
            return Outcome::Tracked;
        }
        if action.is_hold_repeatable() && token.is_arrow() {
            self.repeater.start(action, token);
        }
        Outcome::Dispatched(action)
    }

    /// Resolve and dispatch a solo-modifier release.
    fn fire_solo(&mut self, m: Modifier) -> Outcome {
        let combo = Combo::solo(m);
        let Some(action) = resolve(&self.bindings, &combo) else {
            return Outcome::Tracked;
        };
        let context = self.context();
        if !self.dispatch(action, context.as_deref()) {
            return Outcome::Tracked;
        }
        Outcome::Dispatched(action)
    }

    /// Clear tracking and repeats; optionally cancel a capture.
    fn hard_reset(&mut self, cancel_capture: bool) -> Outcome {
        self.tracker.reset();
        self.repeater.stop();
        if cancel_capture && self.cancel_capture() {
            return Outcome::CaptureCancelled;
        }
        Outcome::Tracked
    }

    // ---- suspension -------------------------------------------------------

    /// True when focus is in a text-editing control or any guard is active.
    pub fn is_tracking_suspended(&self) -> bool {
        self.focus.is_text_editing()
            || self.modal.is_active()
            || self.guards.iter().any(|g| g.is_active())
    }

    /// Clear state when suspended. Returns the suspension status.
    fn check_suspended(&mut self) -> bool {
        let suspended = self.is_tracking_suspended();
        if suspended {
            self.tracker.reset();
            self.repeater.stop();
        }
        suspended
    }

    /// Report what has keyboard focus.
    pub fn set_focus(&mut self, focus: FocusTarget) {
        trace!(focus = ?focus, "focus target");
        self.focus = focus;
        self.check_suspended();
    }

    /// Report the current tree selection.
    pub fn set_selection(&mut self, selection: Option<&str>) {
        self.selection = selection.map(str::to_string);
    }

    /// Add a guard that can suspend tracking.
    pub fn add_guard<G>(&mut self, guard: G)
    where
        G: EditModeGuard + 'static,
    {
        self.guards.push(Box::new(guard));
    }

    /// Handle to the engine's modal lock.
    pub fn modal_lock(&self) -> ModalLock {
        self.modal.clone()
    }

    /// Start an exclusive editing session and clear tracking immediately.
    pub fn begin_modal(&mut self) -> ModalSession {
        let session = self.modal.begin();
        self.check_suspended();
        session
    }

    // ---- modes and capture -----------------------------------------------

    /// Current mode.
    pub fn mode(&self) -> HotkeyMode {
        self.mode
    }

    /// Switch modes. Leaving custom mode cancels any capture.
    pub fn set_mode(&mut self, mode: HotkeyMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = %self.mode, to = %mode, "mode change");
        self.mode = mode;
        self.tracker.reset();
        self.repeater.stop();
        if !mode.suspends_dispatch() {
            self.cancel_capture();
        }
    }

    /// Start capturing a new combo for `action`. Requires custom mode.
    pub fn begin_capture(&mut self, action: Action) -> Result<()> {
        if self.mode != HotkeyMode::Custom {
            return Err(Error::NotCustomMode { mode: self.mode });
        }
        self.cancel_capture();
        self.tracker.reset();
        self.repeater.stop();
        debug!(action = %action, "capture begin");
        self.capture = Some(BindingCapture::new(action));
        Ok(())
    }

    /// Abandon any active capture. Returns true if one was active.
    pub fn cancel_capture(&mut self) -> bool {
        match self.capture.take() {
            Some(c) => {
                debug!(action = %c.action(), "capture cancelled");
                true
            }
            None => false,
        }
    }

    /// Action being captured, if any.
    pub fn capturing(&self) -> Option<Action> {
        self.capture.as_ref().map(BindingCapture::action)
    }

    /// Turn a capture step into an outcome, committing when asked.
    fn apply_capture_step(&mut self, step: CaptureStep) -> Outcome {
        match step {
            CaptureStep::Ignored => Outcome::Swallowed,
            CaptureStep::Cancelled => {
                self.cancel_capture();
                Outcome::CaptureCancelled
            }
            CaptureStep::Commit(combo) => {
                let Some(capture) = self.capture.take() else {
                    return Outcome::Swallowed;
                };
                let action = capture.action();
                self.bindings.set_combo(action, combo.clone());
                debug!(action = %action, combo = %combo, "capture committed");
                Outcome::Captured { action, combo }
            }
        }
    }

    // ---- bindings ---------------------------------------------------------

    /// The binding table.
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Bind `action` to `raw`, normalized. Returns the stored combo.
    pub fn set_binding(&mut self, action: Action, raw: &str) -> Combo {
        self.bindings.set(action, raw)
    }

    /// Restore default bindings. Cancels any capture.
    pub fn reset_bindings(&mut self) {
        self.cancel_capture();
        self.bindings.reset();
    }

    /// Actions whose combos collide.
    pub fn find_conflicts(&self) -> BTreeSet<Action> {
        keybinds::find_conflicts(&self.bindings)
    }

    /// Colliding combos with the actions sharing each.
    pub fn conflict_groups(&self) -> BTreeMap<Combo, Vec<Action>> {
        keybinds::conflict_groups(&self.bindings)
    }

    /// Display form of `action`'s combo for this engine's platform.
    pub fn pretty_combo(&self, action: Action) -> String {
        self.bindings.get(action).pretty(self.platform)
    }

    /// Platform in use.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    // ---- hold repeat ------------------------------------------------------

    /// Dispatch pending hold-repeat ticks. Returns how many actions ran.
    pub fn pump_repeats(&mut self) -> usize {
        let pending = self.repeater.drain();
        let mut ran = 0;
        for action in pending {
            if self.check_suspended() || self.mode.suspends_dispatch() || self.capture.is_some() {
                self.repeater.stop();
                break;
            }
            let context = self.context();
            if self.dispatch(action, context.as_deref()) {
                ran += 1;
            }
        }
        ran
    }

    /// True while a held chord is repeating.
    pub fn is_repeating(&self) -> bool {
        self.repeater.is_active()
    }

    // ---- state ------------------------------------------------------------

    /// Current held-key state.
    pub fn chord_state(&self) -> &ChordState {
        self.tracker.state()
    }

    /// Clear all tracking state and stop repeats.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.repeater.stop();
    }
}

use keybinds::Action;
use keytoken::{Combo, Key, KeyEvent, PointerEvent};

/// What a capture made of one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureStep {
    /// Swallow the event and keep waiting.
    Ignored,
    /// Abandon the capture.
    Cancelled,
    /// Bind this combo and finish.
    Commit(Combo),
}

/// Records the next combo the user presses for one action.
///
/// Keyboard actions commit on the first qualifying keydown. Click actions
/// ignore keys (except `Escape`) and commit on pointer-down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingCapture {
    /// Action being rebound.
    action: Action,
}

impl BindingCapture {
    /// Start capturing for `action`.
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    /// Action being rebound.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Feed a keydown.
    pub fn on_key_down(&self, ev: &KeyEvent) -> CaptureStep {
        let token = ev.token();
        if token == Some(Key::Escape) {
            return CaptureStep::Cancelled;
        }
        if self.action.is_click() || ev.repeat {
            return CaptureStep::Ignored;
        }
        match token {
            None | Some(Key::Tab) => CaptureStep::Ignored,
            Some(k) if k.is_modifier() => CaptureStep::Ignored,
            Some(k) => CaptureStep::Commit(Combo::new(ev.modifiers.modifiers(), [k])),
        }
    }

    /// Feed a pointer-down.
    pub fn on_pointer_down(&self, ev: &PointerEvent) -> CaptureStep {
        if self.action.is_click() {
            CaptureStep::Commit(ev.combo())
        } else {
            CaptureStep::Ignored
        }
    }
}

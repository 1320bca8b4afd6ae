//! Test support utilities for hotkey-engine integration/unit tests.
//! These helpers are public to avoid dead_code warnings and are lightweight.
//! They are intended for use by the test suite and the trace replayer.

use std::{cell::RefCell, rc::Rc};

use keytoken::{KeyEvent, ModifierFlags, PointerEvent};

use crate::{Action, HotkeyEngine, Outcome};

/// Dispatches observed by a [`record_dispatches`] recorder.
pub type DispatchLog = Rc<RefCell<Vec<(Action, Option<String>)>>>;

/// Register a handler on every action that appends `(action, context)` to a log.
pub fn record_dispatches(engine: &mut HotkeyEngine) -> DispatchLog {
    let log: DispatchLog = Rc::new(RefCell::new(Vec::new()));
    for &action in Action::ALL {
        let log = Rc::clone(&log);
        engine.on(action, move |ctx| {
            log.borrow_mut().push((action, ctx.map(str::to_string)));
        });
    }
    log
}

/// Press and release one key with `flags`. Returns the keydown outcome.
pub fn tap(engine: &mut HotkeyEngine, code: &str, key: &str, flags: ModifierFlags) -> Outcome {
    let out = engine.handle_key_down(&KeyEvent::down(code, key).with_modifiers(flags));
    engine.handle_key_up(&KeyEvent::up(code, key).with_modifiers(flags));
    out
}

/// Tap a modifier key alone. Returns the keyup outcome.
pub fn tap_modifier(engine: &mut HotkeyEngine, code: &str, key: &str) -> Outcome {
    let flags = flags_for_modifier_key(key);
    engine.handle_key_down(&KeyEvent::down(code, key).with_modifiers(flags));
    engine.handle_key_up(&KeyEvent::up(code, key))
}

/// Flags a keydown of the named modifier key would carry.
pub fn flags_for_modifier_key(key: &str) -> ModifierFlags {
    match key {
        "Shift" => ModifierFlags::NONE.with_shift(),
        "Alt" => ModifierFlags::NONE.with_alt(),
        "Control" => ModifierFlags::NONE.with_ctrl(),
        "Meta" | "OS" => ModifierFlags::NONE.with_meta(),
        _ => ModifierFlags::NONE,
    }
}

/// Click on `target` with `flags`.
pub fn click(engine: &mut HotkeyEngine, target: Option<&str>, flags: ModifierFlags) -> Outcome {
    engine.handle_pointer_down(&PointerEvent::new(target, flags))
}

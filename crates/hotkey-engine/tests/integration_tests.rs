use std::{cell::Cell, rc::Rc};

use hotkey_engine::{
    Action, EditModeGuard, Error, FocusTarget, HotkeyEngine, HotkeyMode, Outcome,
    test_support::{click, record_dispatches, tap, tap_modifier},
};
use keybinds::{BindingTable, EngineConfig};
use keytoken::{Combo, KeyEvent, ModifierFlags, Platform, Visibility};

const NONE: ModifierFlags = ModifierFlags::NONE;

fn engine() -> HotkeyEngine {
    HotkeyEngine::new(BindingTable::with_defaults(), Platform::Other)
}

/// Guard toggled from the test body.
struct Toggle(Rc<Cell<bool>>);

impl EditModeGuard for Toggle {
    fn is_active(&self) -> bool {
        self.0.get()
    }
}

#[test]
fn arrow_right_dispatches_nav_right_with_row_context() {
    let mut e = engine();
    let log = record_dispatches(&mut e);
    e.set_focus(FocusTarget::Row("n1".into()));
    let out = tap(&mut e, "ArrowRight", "ArrowRight", NONE);
    assert_eq!(out, Outcome::Dispatched(Action::NavRight));
    assert!(out.prevents_default());
    assert_eq!(log.borrow().as_slice(), &[(Action::NavRight, Some("n1".to_string()))]);
}

#[test]
fn selection_is_the_fallback_context() {
    let mut e = engine();
    let log = record_dispatches(&mut e);
    e.set_selection(Some("n7"));
    tap(&mut e, "Backspace", "Backspace", NONE);
    assert_eq!(log.borrow().as_slice(), &[(Action::Delete, Some("n7".to_string()))]);
}

#[test]
fn ctrl_and_meta_are_equivalent() {
    let mut e = engine();
    assert_eq!(
        tap(&mut e, "KeyZ", "z", NONE.with_meta()),
        Outcome::Dispatched(Action::Undo)
    );
    assert_eq!(
        tap(&mut e, "KeyZ", "z", NONE.with_ctrl()),
        Outcome::Dispatched(Action::Undo)
    );
    assert_eq!(
        tap(&mut e, "KeyZ", "Z", NONE.with_ctrl().with_shift()),
        Outcome::Dispatched(Action::Redo)
    );
}

#[test]
fn russian_layout_resolves_by_position() {
    let mut e = engine();
    assert_eq!(
        tap(&mut e, "KeyZ", "я", NONE.with_ctrl()),
        Outcome::Dispatched(Action::Undo)
    );
    assert_eq!(
        tap(&mut e, "Backquote", "ё", NONE),
        Outcome::Dispatched(Action::Rename)
    );
}

#[test]
fn auto_repeat_is_ignored() {
    let mut e = engine();
    let log = record_dispatches(&mut e);
    let down = KeyEvent::down("ArrowDown", "ArrowDown");
    assert_eq!(e.handle_key_down(&down), Outcome::Dispatched(Action::NavDown));
    let before = e.chord_state().clone();
    assert_eq!(e.handle_key_down(&down.clone().repeating()), Outcome::Pass);
    assert_eq!(e.chord_state(), &before);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn unidentified_keys_pass() {
    let mut e = engine();
    assert_eq!(e.handle_key_down(&KeyEvent::down("", "Unidentified")), Outcome::Pass);
    assert!(e.chord_state().is_empty());
}

#[test]
fn unbound_chord_is_only_tracked() {
    let mut e = engine();
    assert_eq!(e.handle_key_down(&KeyEvent::down("KeyQ", "q")), Outcome::Tracked);
    assert!(!Outcome::Tracked.prevents_default());
}

#[test]
fn solo_shift_fires_on_release() {
    let mut e = engine();
    e.set_binding(Action::Rename, "Shift");
    let log = record_dispatches(&mut e);
    // The modifier keydown itself never completes a chord.
    assert_eq!(
        e.handle_key_down(&KeyEvent::down("ShiftLeft", "Shift").with_modifiers(NONE.with_shift())),
        Outcome::Tracked
    );
    assert_eq!(
        e.handle_key_up(&KeyEvent::up("ShiftLeft", "Shift")),
        Outcome::Dispatched(Action::Rename)
    );
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn shift_used_in_a_chord_is_not_solo() {
    let mut e = engine();
    e.set_binding(Action::Rename, "Shift");
    let shift = NONE.with_shift();
    e.handle_key_down(&KeyEvent::down("ShiftLeft", "Shift").with_modifiers(shift));
    e.handle_key_down(&KeyEvent::down("KeyA", "A").with_modifiers(shift));
    e.handle_key_up(&KeyEvent::up("KeyA", "A").with_modifiers(shift));
    assert_eq!(e.handle_key_up(&KeyEvent::up("ShiftLeft", "Shift")), Outcome::Tracked);
}

#[test]
fn solo_meta_maps_to_mod() {
    let mut e = engine();
    e.set_binding(Action::AddChild, "Cmd");
    assert_eq!(
        tap_modifier(&mut e, "MetaLeft", "Meta"),
        Outcome::Dispatched(Action::AddChild)
    );
    assert_eq!(
        tap_modifier(&mut e, "ControlRight", "Control"),
        Outcome::Dispatched(Action::AddChild)
    );
}

#[test]
fn blur_resets_tracking() {
    let mut e = engine();
    e.set_binding(Action::Rename, "Shift");
    e.handle_key_down(&KeyEvent::down("ShiftLeft", "Shift").with_modifiers(NONE.with_shift()));
    e.handle_key_down(&KeyEvent::down("KeyA", "A").with_modifiers(NONE.with_shift()));
    assert!(!e.chord_state().is_empty());
    e.handle_blur();
    assert!(e.chord_state().is_empty());
    // The shift keyup after the blur is not a solo tap.
    assert_eq!(e.handle_key_up(&KeyEvent::up("ShiftLeft", "Shift")), Outcome::Tracked);

    e.handle_key_down(&KeyEvent::down("KeyA", "a"));
    e.handle_visibility(Visibility::Hidden);
    assert!(e.chord_state().is_empty());
    e.handle_key_down(&KeyEvent::down("KeyA", "a"));
    e.handle_focus();
    assert!(e.chord_state().is_empty());
}

#[test]
fn released_keys_never_stick_whatever_the_release_order() {
    let shift = NONE.with_shift();
    for shift_first in [true, false] {
        let mut e = engine();
        e.handle_key_down(&KeyEvent::down("ShiftLeft", "Shift").with_modifiers(shift));
        e.handle_key_down(&KeyEvent::down("Equal", "+").with_modifiers(shift));
        if shift_first {
            e.handle_key_up(&KeyEvent::up("ShiftLeft", "Shift"));
            e.handle_key_up(&KeyEvent::up("Equal", "="));
        } else {
            e.handle_key_up(&KeyEvent::up("Equal", "+").with_modifiers(shift));
            e.handle_key_up(&KeyEvent::up("ShiftLeft", "Shift"));
        }
        assert!(e.chord_state().is_empty(), "{:?}", e.chord_state());
        assert_eq!(
            tap(&mut e, "ArrowDown", "ArrowDown", NONE),
            Outcome::Dispatched(Action::NavDown)
        );
    }
}

#[test]
fn lost_keyup_under_mod_is_forgotten_on_release() {
    let mut e = engine();
    let meta = NONE.with_meta();
    e.handle_key_down(&KeyEvent::down("MetaLeft", "Meta").with_modifiers(meta));
    assert_eq!(
        e.handle_key_down(&KeyEvent::down("KeyZ", "z").with_modifiers(meta)),
        Outcome::Dispatched(Action::Undo)
    );
    // No keyup for KeyZ while Command is held.
    e.handle_key_up(&KeyEvent::up("MetaLeft", "Meta"));
    assert!(e.chord_state().is_empty());
    assert_eq!(
        tap(&mut e, "ArrowUp", "ArrowUp", NONE),
        Outcome::Dispatched(Action::NavUp)
    );
}

#[test]
fn text_fields_suspend_tracking() {
    let mut e = engine();
    let log = record_dispatches(&mut e);
    e.handle_key_down(&KeyEvent::down("KeyA", "a"));
    e.set_focus(FocusTarget::TextInput);
    assert!(e.is_tracking_suspended());
    assert!(e.chord_state().is_empty());
    assert_eq!(tap(&mut e, "ArrowUp", "ArrowUp", NONE), Outcome::Pass);
    assert_eq!(click(&mut e, Some("n1"), NONE.with_ctrl().with_shift()), Outcome::Pass);
    e.set_focus(FocusTarget::ContentEditable);
    assert_eq!(tap(&mut e, "Enter", "Enter", NONE), Outcome::Pass);
    assert!(log.borrow().is_empty());

    e.set_focus(FocusTarget::Row("n2".into()));
    assert_eq!(
        tap(&mut e, "ArrowUp", "ArrowUp", NONE),
        Outcome::Dispatched(Action::NavUp)
    );
}

#[test]
fn modal_session_suspends_until_dropped() {
    let mut e = engine();
    let session = e.begin_modal();
    assert!(e.is_tracking_suspended());
    assert_eq!(tap(&mut e, "Enter", "Enter", NONE), Outcome::Pass);
    assert!(e.chord_state().is_empty());
    drop(session);
    assert!(!e.is_tracking_suspended());
    assert_eq!(
        tap(&mut e, "Enter", "Enter", NONE),
        Outcome::Dispatched(Action::AddSibling)
    );

    // A session started from a cloned handle is seen on the next event.
    let lock = e.modal_lock();
    e.handle_key_down(&KeyEvent::down("KeyA", "a"));
    let _s = lock.begin();
    assert_eq!(e.handle_key_down(&KeyEvent::down("KeyB", "b")), Outcome::Pass);
    assert!(e.chord_state().is_empty());
}

#[test]
fn injected_guard_suspends() {
    let mut e = engine();
    let flag = Rc::new(Cell::new(false));
    e.add_guard(Toggle(Rc::clone(&flag)));
    assert!(!e.is_tracking_suspended());
    flag.set(true);
    assert_eq!(tap(&mut e, "Enter", "Enter", NONE), Outcome::Pass);
    flag.set(false);
    assert_eq!(
        tap(&mut e, "Enter", "Enter", NONE),
        Outcome::Dispatched(Action::AddSibling)
    );
}

#[test]
fn click_bindings_use_pointer_flags_and_target() {
    let mut e = engine();
    let log = record_dispatches(&mut e);
    e.set_selection(Some("sel"));
    assert_eq!(
        click(&mut e, Some("n5"), NONE.with_meta().with_shift()),
        Outcome::Dispatched(Action::DeepClick)
    );
    assert_eq!(
        click(&mut e, None, NONE.with_ctrl().with_alt().with_shift()),
        Outcome::Dispatched(Action::RangeClick)
    );
    assert_eq!(click(&mut e, Some("n5"), NONE), Outcome::Pass);
    assert_eq!(
        log.borrow().as_slice(),
        &[
            (Action::DeepClick, Some("n5".to_string())),
            (Action::RangeClick, Some("sel".to_string())),
        ]
    );
}

#[test]
fn custom_mode_suspends_dispatch() {
    let mut e = engine();
    let log = record_dispatches(&mut e);
    e.set_mode(HotkeyMode::Custom);
    assert_eq!(tap(&mut e, "ArrowRight", "ArrowRight", NONE), Outcome::Tracked);
    assert_eq!(click(&mut e, Some("n1"), NONE.with_ctrl().with_shift()), Outcome::Pass);
    assert!(!e.dispatch(Action::Undo, None));
    assert!(log.borrow().is_empty());
    e.set_mode(HotkeyMode::Builtin);
    assert!(e.dispatch(Action::Undo, None));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn capture_requires_custom_mode() {
    let mut e = engine();
    assert!(matches!(
        e.begin_capture(Action::Rename),
        Err(Error::NotCustomMode { mode: HotkeyMode::Builtin })
    ));
    assert_eq!(e.capturing(), None);
}

#[test]
fn rebind_rename_to_f2_through_capture() {
    let mut e = engine();
    let log = record_dispatches(&mut e);
    e.set_mode(HotkeyMode::Custom);
    e.begin_capture(Action::Rename).expect("capture");
    assert_eq!(e.capturing(), Some(Action::Rename));

    // Ignored keys are swallowed and keep the capture alive.
    assert_eq!(e.handle_key_down(&KeyEvent::down("Tab", "Tab")), Outcome::Swallowed);
    assert_eq!(e.handle_key_up(&KeyEvent::up("Tab", "Tab")), Outcome::Swallowed);
    assert_eq!(click(&mut e, Some("n1"), NONE), Outcome::Swallowed);

    assert_eq!(
        e.handle_key_down(&KeyEvent::down("F2", "F2")),
        Outcome::Captured {
            action: Action::Rename,
            combo: Combo::parse("F2"),
        }
    );
    assert_eq!(e.capturing(), None);
    assert!(e.find_conflicts().is_empty());
    assert!(log.borrow().is_empty());

    e.set_mode(HotkeyMode::Builtin);
    assert_eq!(tap(&mut e, "F2", "F2", NONE), Outcome::Dispatched(Action::Rename));
    assert_eq!(tap(&mut e, "Backquote", "`", NONE), Outcome::Tracked);
}

#[test]
fn capture_reports_conflicts_without_rejecting() {
    let mut e = engine();
    e.set_mode(HotkeyMode::Custom);
    e.begin_capture(Action::Rename).expect("capture");
    e.handle_key_down(&KeyEvent::down("KeyZ", "z").with_modifiers(NONE.with_ctrl()));
    assert_eq!(e.bindings().get(Action::Rename).to_string(), "Mod+Z");
    assert_eq!(
        e.find_conflicts().into_iter().collect::<Vec<_>>(),
        vec![Action::Undo, Action::Rename]
    );
}

#[test]
fn capture_cancellation_paths() {
    let mut e = engine();
    e.set_mode(HotkeyMode::Custom);

    e.begin_capture(Action::Delete).expect("capture");
    assert_eq!(
        e.handle_key_down(&KeyEvent::down("Escape", "Escape")),
        Outcome::CaptureCancelled
    );
    assert_eq!(e.bindings().get(Action::Delete).to_string(), "Backspace");

    e.begin_capture(Action::Delete).expect("capture");
    assert_eq!(e.handle_blur(), Outcome::CaptureCancelled);

    e.begin_capture(Action::Delete).expect("capture");
    assert_eq!(e.handle_visibility(Visibility::Hidden), Outcome::CaptureCancelled);

    e.begin_capture(Action::Delete).expect("capture");
    e.reset_bindings();
    assert_eq!(e.capturing(), None);

    e.begin_capture(Action::Delete).expect("capture");
    e.set_mode(HotkeyMode::Builtin);
    assert_eq!(e.capturing(), None);
}

#[test]
fn click_action_capture() {
    let mut e = engine();
    e.set_mode(HotkeyMode::Custom);
    e.begin_capture(Action::RangeClick).expect("capture");
    assert_eq!(e.handle_key_down(&KeyEvent::down("KeyA", "a")), Outcome::Swallowed);
    assert_eq!(
        click(&mut e, Some("n1"), NONE.with_alt()),
        Outcome::Captured {
            action: Action::RangeClick,
            combo: Combo::parse("Alt+Click"),
        }
    );
    e.set_mode(HotkeyMode::Builtin);
    assert_eq!(
        click(&mut e, Some("n1"), NONE.with_alt()),
        Outcome::Dispatched(Action::RangeClick)
    );
}

#[test]
fn engine_from_config() {
    let cfg = EngineConfig::from_ron(
        r#"(platform: Some(apple), bindings: { "rename": "F2", "undo": "ctrl+u" })"#,
    )
    .expect("config");
    let mut e = HotkeyEngine::from_config(&cfg).expect("engine");
    assert_eq!(e.platform(), Platform::Apple);
    assert_eq!(e.pretty_combo(Action::Undo), "Command+U");
    assert_eq!(e.pretty_combo(Action::MoveUp), "Shift+↑");
    assert_eq!(tap(&mut e, "F2", "F2", NONE), Outcome::Dispatched(Action::Rename));
    assert_eq!(
        tap(&mut e, "KeyU", "u", NONE.with_meta()),
        Outcome::Dispatched(Action::Undo)
    );
}

#[test]
fn explicit_reset_clears_state() {
    let mut e = engine();
    e.handle_key_down(&KeyEvent::down("KeyA", "a"));
    e.handle_key_down(&KeyEvent::down("AltLeft", "Alt").with_modifiers(NONE.with_alt()));
    assert!(!e.chord_state().is_empty());
    e.reset();
    assert!(e.chord_state().is_empty());
}

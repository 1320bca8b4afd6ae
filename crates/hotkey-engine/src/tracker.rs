use std::collections::{BTreeMap, BTreeSet};

use keytoken::{Combo, Key, Modifier, ModifierFlags};
use tracing::trace;

/// Keys the tracker believes are held.
///
/// `solo_eligible` is always a subset of `down_mods`. All three sets are
/// cleared together. Held non-modifiers are keyed by physical code, so a
/// keyup whose logical value changed (Shift released first turns `+` into
/// `=`) still releases the token recorded at keydown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChordState {
    /// Held non-modifier tokens, keyed by physical code.
    pub pressed_non_mods: BTreeMap<String, Key>,
    /// Held modifiers.
    pub down_mods: BTreeSet<Modifier>,
    /// Held modifiers that have not been used with any other key yet.
    pub solo_eligible: BTreeSet<Modifier>,
}

impl ChordState {
    /// True when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.pressed_non_mods.is_empty()
            && self.down_mods.is_empty()
            && self.solo_eligible.is_empty()
    }
}

/// What one key event meant to the tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackStep {
    /// State updated, nothing to match.
    Idle,
    /// A non-modifier went down; this is the combo to match.
    Chord(Combo),
    /// A modifier was pressed and released with nothing else.
    Solo(Modifier),
}

/// Stateful chord recognizer.
///
/// Held non-modifiers come from tracked keydown/keyup pairs. Modifiers for
/// matching come from the event flags of the completing event, which keeps
/// matching correct when the OS swallows a modifier keyup. Tracked modifiers
/// drive solo detection only.
#[derive(Clone, Debug, Default)]
pub struct ChordTracker {
    /// Current held-key view.
    state: ChordState,
}

impl ChordTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &ChordState {
        &self.state
    }

    /// Record a non-repeat keydown of `token` at physical `code` carrying `flags`.
    pub fn key_down(&mut self, code: &str, token: Key, flags: ModifierFlags) -> TrackStep {
        if let Ok(m) = Modifier::try_from(token) {
            self.state.down_mods.insert(m);
            self.state.solo_eligible.insert(m);
            return TrackStep::Idle;
        }
        if !self.state.down_mods.is_empty() {
            self.state.solo_eligible.clear();
        }
        self.state.pressed_non_mods.insert(slot(code, token), token);
        TrackStep::Chord(self.live_combo(flags))
    }

    /// Record a keyup of `token` at physical `code`.
    pub fn key_up(&mut self, code: &str, token: Key) -> TrackStep {
        let Ok(m) = Modifier::try_from(token) else {
            if self.state.pressed_non_mods.remove(&slot(code, token)).is_none() {
                self.state.pressed_non_mods.retain(|_, held| *held != token);
            }
            return TrackStep::Idle;
        };
        let can_solo =
            self.state.solo_eligible.contains(&m) && self.state.pressed_non_mods.is_empty();
        if m == Modifier::Mod && !self.state.pressed_non_mods.is_empty() {
            // macOS drops non-modifier keyups while Command is held.
            trace!(held = self.state.pressed_non_mods.len(), "mod release clears held keys");
            self.state.pressed_non_mods.clear();
        }
        self.state.down_mods.remove(&m);
        self.state.solo_eligible.remove(&m);
        if can_solo && self.state.down_mods.is_empty() {
            trace!(modifier = ?m, "solo modifier release");
            return TrackStep::Solo(m);
        }
        TrackStep::Idle
    }

    /// Combo formed by the held non-modifiers and the given event flags.
    pub fn live_combo(&self, flags: ModifierFlags) -> Combo {
        Combo::new(flags.modifiers(), self.state.pressed_non_mods.values().copied())
    }

    /// Forget everything held.
    pub fn reset(&mut self) {
        if !self.state.is_empty() {
            trace!("chord state reset");
        }
        self.state = ChordState::default();
    }
}

/// Map key for a held non-modifier: the physical code, else the token name.
fn slot(code: &str, token: Key) -> String {
    if code.is_empty() {
        token.to_string()
    } else {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Key = Key::Char('A');
    const S: Key = Key::Char('S');

    #[test]
    fn plain_key_completes_chord() {
        let mut t = ChordTracker::new();
        assert_eq!(
            t.key_down("ArrowRight", Key::ArrowRight, ModifierFlags::NONE),
            TrackStep::Chord(Combo::parse("ArrowRight"))
        );
        assert_eq!(t.key_up("ArrowRight", Key::ArrowRight), TrackStep::Idle);
        assert!(t.state().is_empty());
    }

    #[test]
    fn modifier_down_never_completes() {
        let mut t = ChordTracker::new();
        let flags = ModifierFlags::NONE.with_shift();
        assert_eq!(t.key_down("ShiftLeft", Key::Shift, flags), TrackStep::Idle);
        assert_eq!(t.key_down("KeyA", A, flags), TrackStep::Chord(Combo::parse("Shift+A")));
    }

    #[test]
    fn multi_key_chord() {
        let mut t = ChordTracker::new();
        t.key_down("KeyA", A, ModifierFlags::NONE);
        assert_eq!(
            t.key_down("KeyS", S, ModifierFlags::NONE),
            TrackStep::Chord(Combo::parse("A+S"))
        );
    }

    #[test]
    fn solo_shift_fires_on_release() {
        let mut t = ChordTracker::new();
        t.key_down("ShiftLeft", Key::Shift, ModifierFlags::NONE.with_shift());
        assert_eq!(t.key_up("ShiftLeft", Key::Shift), TrackStep::Solo(Modifier::Shift));
        assert!(t.state().is_empty());
    }

    #[test]
    fn used_modifier_is_not_solo() {
        let mut t = ChordTracker::new();
        let flags = ModifierFlags::NONE.with_shift();
        t.key_down("ShiftLeft", Key::Shift, flags);
        t.key_down("KeyA", A, flags);
        t.key_up("KeyA", A);
        assert_eq!(t.key_up("ShiftLeft", Key::Shift), TrackStep::Idle);
    }

    #[test]
    fn no_solo_while_non_mod_held() {
        let mut t = ChordTracker::new();
        t.key_down("KeyA", A, ModifierFlags::NONE);
        t.key_down("AltLeft", Key::Alt, ModifierFlags::NONE.with_alt());
        assert_eq!(t.key_up("AltLeft", Key::Alt), TrackStep::Idle);
    }

    #[test]
    fn no_solo_while_other_modifier_held() {
        let mut t = ChordTracker::new();
        t.key_down("ShiftLeft", Key::Shift, ModifierFlags::NONE.with_shift());
        t.key_down("AltLeft", Key::Alt, ModifierFlags::NONE.with_shift().with_alt());
        assert_eq!(t.key_up("AltLeft", Key::Alt), TrackStep::Idle);
        assert!(t.state().solo_eligible.is_subset(&t.state().down_mods));
    }

    #[test]
    fn event_flags_win_over_tracked_modifiers() {
        let mut t = ChordTracker::new();
        // Shift keydown seen, but its keyup was lost: flags say no shift.
        t.key_down("ShiftLeft", Key::Shift, ModifierFlags::NONE.with_shift());
        assert_eq!(
            t.key_down("KeyA", A, ModifierFlags::NONE),
            TrackStep::Chord(Combo::parse("A"))
        );
        // Mod held per flags without any tracked keydown.
        t.key_up("KeyA", A);
        assert_eq!(
            t.key_down("KeyZ", Key::Char('Z'), ModifierFlags::NONE.with_meta()),
            TrackStep::Chord(Combo::parse("Mod+Z"))
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut t = ChordTracker::new();
        t.key_down("ShiftLeft", Key::Shift, ModifierFlags::NONE.with_shift());
        t.key_down("KeyA", A, ModifierFlags::NONE.with_shift());
        t.reset();
        assert_eq!(t.state(), &ChordState::default());
        // A modifier released after a reset is not solo.
        assert_eq!(t.key_up("ShiftLeft", Key::Shift), TrackStep::Idle);
    }

    #[test]
    fn keyup_releases_by_physical_code() {
        let mut t = ChordTracker::new();
        let shift = ModifierFlags::NONE.with_shift();
        t.key_down("ShiftLeft", Key::Shift, shift);
        assert_eq!(
            t.key_down("Equal", Key::Plus, shift),
            TrackStep::Chord(Combo::parse("+"))
        );
        t.key_up("ShiftLeft", Key::Shift);
        // Without Shift the same key reports `=`.
        t.key_up("Equal", Key::Char('='));
        assert!(t.state().is_empty());
    }

    #[test]
    fn codeless_keyup_releases_by_token() {
        let mut t = ChordTracker::new();
        t.key_down("", Key::Plus, ModifierFlags::NONE);
        assert_eq!(t.state().pressed_non_mods.get("Plus"), Some(&Key::Plus));
        t.key_up("NumpadAdd", Key::Plus);
        assert!(t.state().pressed_non_mods.is_empty());
    }

    #[test]
    fn mod_release_clears_held_keys() {
        let mut t = ChordTracker::new();
        let meta = ModifierFlags::NONE.with_meta();
        t.key_down("MetaLeft", Key::Mod, meta);
        t.key_down("KeyZ", Key::Char('Z'), meta);
        // The KeyZ keyup never arrives.
        assert_eq!(t.key_up("MetaLeft", Key::Mod), TrackStep::Idle);
        assert!(t.state().is_empty());
        assert_eq!(
            t.key_down("ArrowDown", Key::ArrowDown, ModifierFlags::NONE),
            TrackStep::Chord(Combo::parse("ArrowDown"))
        );
    }
}

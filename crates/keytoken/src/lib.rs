//! keytoken: Canonical key tokens and combos for hotkey matching.
//!
//! - `Key`: The closed token vocabulary (letters, digits, named keys,
//!   `F1`–`F24`, `Click`, and the modifiers `Mod`, `Alt`, `Shift`).
//! - `Modifier` and `ModifierFlags`: modifier tokens and the raw event flags
//!   they are derived from. Ctrl and Meta both map to `Mod`.
//! - `Combo`: a normalized set of tokens with a single canonical spelling,
//!   plus `normalize_combo` for arbitrary user strings.
//! - `token_from_event`: maps a raw keyboard event to a token, preferring the
//!   physical key code so that every keyboard layout yields the same token.
//! - `Platform`: display labels and the primary modifier flag.

mod key;
pub use key::Key;

mod spec;

mod modifiers;
pub use modifiers::{Modifier, ModifierFlags};

mod combo;
pub use combo::{Combo, normalize_combo};

mod platform;
pub use platform::Platform;

mod event;
pub use event::{
    InputEvent, KeyEvent, KeyEventKind, PointerEvent, Visibility, token_from_event,
};

use serde::{Deserialize, Serialize};

use crate::{Combo, Key, ModifierFlags};

/// Whether a key went down or came up.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventKind {
    /// `keydown`.
    Down,
    /// `keyup`.
    Up,
}

/// A raw keyboard event as delivered by the host.
///
/// `code` is the physical key position (`"KeyA"`, `"Digit1"`, `"ShiftLeft"`)
/// and `key` the layout-dependent logical value (`"a"`, `"ф"`, `"Shift"`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Down or up.
    pub kind: KeyEventKind,
    /// Physical key code.
    pub code: String,
    /// Logical key value.
    pub key: String,
    /// Set by the OS for auto-repeated keydowns.
    pub repeat: bool,
    /// Modifier flags carried by the event.
    pub modifiers: ModifierFlags,
}

impl KeyEvent {
    fn new(kind: KeyEventKind, code: &str, key: &str) -> Self {
        Self {
            kind,
            code: code.to_string(),
            key: key.to_string(),
            repeat: false,
            modifiers: ModifierFlags::NONE,
        }
    }

    /// A keydown with no modifier flags.
    pub fn down(code: &str, key: &str) -> Self {
        Self::new(KeyEventKind::Down, code, key)
    }

    /// A keyup with no modifier flags.
    pub fn up(code: &str, key: &str) -> Self {
        Self::new(KeyEventKind::Up, code, key)
    }

    /// Replace the modifier flags.
    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark as an auto-repeat.
    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Canonical token for this event, if any.
    pub fn token(&self) -> Option<Key> {
        token_from_event(self)
    }
}

/// A primary-button pointer press.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Modifier flags carried by the event.
    pub modifiers: ModifierFlags,
    /// Id of the row under the pointer, when there is one.
    pub target: Option<String>,
}

impl PointerEvent {
    /// A click on `target` with the given flags.
    pub fn new(target: Option<&str>, modifiers: ModifierFlags) -> Self {
        Self {
            modifiers,
            target: target.map(str::to_string),
        }
    }

    /// Click combo: the event's own modifiers plus `Click`.
    pub fn combo(&self) -> Combo {
        Combo::new(self.modifiers.modifiers(), [Key::Click])
    }
}

/// Document visibility.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Page is shown.
    Visible,
    /// Page is hidden (tab switched, window minimized).
    Hidden,
}

/// Every event the engine consumes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// `keydown` or `keyup`.
    Key(KeyEvent),
    /// `mousedown` with the primary button.
    Pointer(PointerEvent),
    /// Window lost focus.
    Blur,
    /// Window gained focus.
    Focus,
    /// `visibilitychange`.
    Visibility(Visibility),
}

/// Physical codes that map to a token regardless of layout.
fn token_from_code(code: &str) -> Option<Key> {
    if let Some(rest) = code.strip_prefix("Key") {
        let mut chars = rest.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && c.is_ascii_alphabetic()
        {
            return Some(Key::Char(c.to_ascii_uppercase()));
        }
        return None;
    }
    if let Some(rest) = code.strip_prefix("Digit").or_else(|| code.strip_prefix("Numpad")) {
        let mut chars = rest.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && c.is_ascii_digit()
        {
            return Some(Key::Char(c));
        }
    }
    let k = match code {
        "Backquote" => Key::Backquote,
        "ArrowUp" => Key::ArrowUp,
        "ArrowDown" => Key::ArrowDown,
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        "Enter" | "NumpadEnter" => Key::Enter,
        "Backspace" => Key::Backspace,
        "Delete" => Key::Delete,
        "Escape" => Key::Escape,
        "Space" => Key::Space,
        "Tab" => Key::Tab,
        "ShiftLeft" | "ShiftRight" => Key::Shift,
        "AltLeft" | "AltRight" => Key::Alt,
        "ControlLeft" | "ControlRight" | "MetaLeft" | "MetaRight" | "OSLeft" | "OSRight" => {
            Key::Mod
        }
        c if c.starts_with('F') => return Key::from_name(c),
        _ => return None,
    };
    Some(k)
}

/// Logical key values, used when the physical code is not stable.
fn token_from_key_value(key: &str) -> Option<Key> {
    match key {
        "" | "Unidentified" => None,
        " " | "Spacebar" => Some(Key::Space),
        "Esc" => Some(Key::Escape),
        "+" => Some(Key::Plus),
        "Shift" => Some(Key::Shift),
        "Alt" => Some(Key::Alt),
        "Control" | "Meta" | "OS" => Some(Key::Mod),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::from_char(c),
                // Pointer-only and modifier names are not keyboard values.
                _ => Key::from_name(key).filter(|k| *k != Key::Click && !k.is_modifier()),
            }
        }
    }
}

/// Map a raw keyboard event to its canonical token.
///
/// The physical code wins when it is one of the stable codes (letters,
/// digits, arrows, modifiers, ...); otherwise the logical key value is used.
/// Empty, `"Unidentified"` and unknown values yield `None`, which callers
/// must ignore. Never panics.
pub fn token_from_event(ev: &KeyEvent) -> Option<Key> {
    token_from_code(&ev.code).or_else(|| token_from_key_value(&ev.key))
}

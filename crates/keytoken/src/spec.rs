use crate::Key;

// Alias words accepted when parsing combo strings. They are matched against
// the lowercased component and never emitted.
macro_rules! key_spec_aliases {
    ($m:ident, $arg:expr) => {
        $m! { $arg,
            // Ctrl and Command both collapse into the platform-neutral Mod.
            Mod => "mod",
            Mod => "cmd",
            Mod => "command",
            Mod => "meta",
            Mod => "os",
            Mod => "win",
            Mod => "windows",
            Mod => "control",
            Mod => "ctrl",
            Mod => "super",
            Alt => "alt",
            Alt => "option",
            Alt => "opt",
            Shift => "shift",

            Click => "click",
            Click => "клик",

            Escape => "esc",
            Delete => "del",
            Space => "spacebar",
            Plus => "plus",
            Backquote => "yo",
            Backquote => "grave",

            Enter => "return",
            Enter => "ret",
            ArrowUp => "up",
            ArrowDown => "down",
            ArrowLeft => "left",
            ArrowRight => "right",
            PageUp => "pgup",
            PageDown => "pgdn",
            Insert => "ins",
        }
    };
}

macro_rules! from_spec_match {
    ( $s:expr, $( $k:ident => $v:expr, )* ) => {{
        match $s {
            $( $v => Some(Key::$k), )*
            _ => None,
        }
    }}
}

/// Parses one component of a combo string into a `Key`.
///
/// Lookup order:
/// - alias words (case-insensitive, including Cyrillic `клик`),
/// - canonical names via `Key::from_name` (`ArrowUp`, `F2`, `Backquote`),
/// - a single character via `Key::from_char`.
///
/// Returns `None` for empty or unknown components; callers drop them.
pub fn from_spec(s: &str) -> Option<Key> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let lowered = s.to_lowercase();
    if let some @ Some(_) = key_spec_aliases!(from_spec_match, lowered.as_str()) {
        return some;
    }
    if let Some(k) = Key::from_name(s) {
        return Some(k);
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Key::from_char(c),
        _ => None,
    }
}

impl Key {
    /// Parses a key specification string into a `Key`.
    ///
    /// Accepts canonical names, the alias words used in hand-written
    /// bindings (`cmd`, `ctrl`, `opt`, `esc`, `del`, `yo`, ...) and single
    /// characters. Ctrl, Command, Meta, OS and Win all become `Key::Mod`.
    pub fn from_spec(s: &str) -> Option<Self> {
        from_spec(s)
    }
}

use std::{collections::BTreeSet, convert::TryFrom};

use serde::{Deserialize, Serialize};

use crate::Key;

/// The three platform-neutral modifier tokens.
///
/// Declaration order is the canonical combo order: `Mod`, `Alt`, `Shift`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    /// Ctrl on Windows/Linux, Command on macOS.
    Mod,
    /// Alt, or Option on macOS.
    Alt,
    /// Shift.
    Shift,
}

impl Modifier {
    /// All modifiers in canonical order.
    pub const ALL: [Self; 3] = [Self::Mod, Self::Alt, Self::Shift];

    /// Parses a modifier word via key specs, then converts.
    ///
    /// Accepts every alias `Key::from_spec` accepts (`cmd`, `ctrl`, `meta`,
    /// `win`, `opt`, ...). Non-modifier keys fail.
    pub fn from_spec(s: &str) -> Option<Self> {
        Key::from_spec(s).and_then(|k| Self::try_from(k).ok())
    }
}

impl From<Modifier> for Key {
    fn from(m: Modifier) -> Self {
        match m {
            Modifier::Mod => Self::Mod,
            Modifier::Alt => Self::Alt,
            Modifier::Shift => Self::Shift,
        }
    }
}

impl TryFrom<Key> for Modifier {
    type Error = ();
    fn try_from(k: Key) -> Result<Self, Self::Error> {
        match k {
            Key::Mod => Ok(Self::Mod),
            Key::Alt => Ok(Self::Alt),
            Key::Shift => Ok(Self::Shift),
            _ => Err(()),
        }
    }
}

/// Modifier flags as reported on a keyboard or pointer event.
///
/// These are the event's own flags, not the tracker's view of held keys.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ModifierFlags {
    /// `shiftKey`.
    pub shift: bool,
    /// `altKey`.
    pub alt: bool,
    /// `ctrlKey`.
    pub ctrl: bool,
    /// `metaKey`.
    pub meta: bool,
}

impl ModifierFlags {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    /// Convert flags to modifier tokens. Ctrl and Meta both become `Mod`.
    pub fn modifiers(self) -> BTreeSet<Modifier> {
        let mut set = BTreeSet::new();
        if self.ctrl || self.meta {
            set.insert(Modifier::Mod);
        }
        if self.alt {
            set.insert(Modifier::Alt);
        }
        if self.shift {
            set.insert(Modifier::Shift);
        }
        set
    }

    /// True when no flag is set.
    pub const fn is_empty(self) -> bool {
        !(self.shift || self.alt || self.ctrl || self.meta)
    }

    /// Returns a copy with `shift` set.
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Returns a copy with `alt` set.
    pub const fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Returns a copy with `ctrl` set.
    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Returns a copy with `meta` set.
    pub const fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Parse a flag list such as `"shift+meta"` or `"ctrl, alt"`.
    ///
    /// Separators are `+`, `,` and whitespace. `mod`/`cmd` set `meta`;
    /// `none` and the empty string yield no flags. Unknown words are
    /// returned as the error.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut flags = Self::NONE;
        for word in s
            .split(|c: char| c == '+' || c == ',' || c.is_whitespace())
            .filter(|w| !w.is_empty())
        {
            match word.to_ascii_lowercase().as_str() {
                "shift" => flags.shift = true,
                "alt" | "opt" | "option" => flags.alt = true,
                "ctrl" | "control" => flags.ctrl = true,
                "meta" | "cmd" | "command" | "mod" | "os" | "win" => flags.meta = true,
                "none" => {}
                _ => return Err(word.to_string()),
            }
        }
        Ok(flags)
    }
}

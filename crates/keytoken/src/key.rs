use std::{cmp::Ordering, fmt};

// Named keys and their canonical spelling. The spelling doubles as the
// case-insensitive lookup name used by `Key::from_name`.
macro_rules! named_keys {
    ( $( $(#[$doc:meta])* $variant:ident => $name:literal, )* ) => {
        /// A single canonical key token.
        ///
        /// Letters and digits are carried by `Char` and always derive from the
        /// physical key position, so every keyboard layout yields the same
        /// token. `Shift`, `Alt` and `Mod` are the modifier tokens.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum Key {
            /// A printable character key, stored uppercased (`A`–`Z`, `0`–`9`, punctuation).
            Char(char),
            /// Function key `F1`–`F24`.
            F(u8),
            $( $(#[$doc])* $variant, )*
        }

        impl Key {
            /// Every named (non-`Char`, non-`F`) key.
            pub const NAMED: &'static [Key] = &[ $( Key::$variant, )* ];

            /// Canonical spelling for named keys; `None` for `Char` and `F`.
            const fn named(self) -> Option<&'static str> {
                match self {
                    $( Key::$variant => Some($name), )*
                    Key::Char(_) | Key::F(_) => None,
                }
            }

            /// Case-insensitive lookup of a key by its canonical name.
            ///
            /// Accepts `"ArrowUp"`, `"arrowup"`, `"F2"`, `"Mod"`. Single
            /// characters are not names; use `Key::from_char` for those.
            pub fn from_name(name: &str) -> Option<Self> {
                $(
                    if name.eq_ignore_ascii_case($name) {
                        return Some(Key::$variant);
                    }
                )*
                parse_function_key(name)
            }
        }
    };
}

named_keys! {
    /// The platform-neutral primary modifier (Ctrl, or Command on macOS).
    Mod => "Mod",
    /// Alt (Option on macOS).
    Alt => "Alt",
    /// Shift.
    Shift => "Shift",
    /// Up arrow.
    ArrowUp => "ArrowUp",
    /// Down arrow.
    ArrowDown => "ArrowDown",
    /// Left arrow.
    ArrowLeft => "ArrowLeft",
    /// Right arrow.
    ArrowRight => "ArrowRight",
    /// Enter or Return (also the numpad Enter).
    Enter => "Enter",
    /// Escape.
    Escape => "Escape",
    /// Backspace.
    Backspace => "Backspace",
    /// Forward delete.
    Delete => "Delete",
    /// Tab.
    Tab => "Tab",
    /// Space bar.
    Space => "Space",
    /// The `+` key. `Shift+Plus` is spelled `"+"` in combos.
    Plus => "Plus",
    /// Physical backquote key; the `ё` key on Russian layouts.
    Backquote => "Backquote",
    /// Home.
    Home => "Home",
    /// End.
    End => "End",
    /// Page Up.
    PageUp => "PageUp",
    /// Page Down.
    PageDown => "PageDown",
    /// Insert.
    Insert => "Insert",
    /// A primary pointer click, bound together with held modifiers.
    Click => "Click",
}

/// Highest function key number accepted.
const MAX_FUNCTION_KEY: u8 = 24;

/// Parse `F1`..`F24` (case-insensitive).
fn parse_function_key(name: &str) -> Option<Key> {
    let digits = name.strip_prefix(['F', 'f'])?;
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u8 = digits.parse().ok()?;
    (1..=MAX_FUNCTION_KEY).contains(&n).then_some(Key::F(n))
}

impl Key {
    /// Build a token from a single typed or spelled character.
    ///
    /// Space, `+` and the backquote/`ё` characters map to their named keys;
    /// control and whitespace characters yield `None`. Everything else is
    /// uppercased when the uppercase form is a single character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::Space),
            '+' => Some(Self::Plus),
            '`' | 'ё' | 'Ё' => Some(Self::Backquote),
            c if c.is_control() || c.is_whitespace() => None,
            c => Some(Self::Char(uppercase(c))),
        }
    }

    /// True for `Shift`, `Alt` and `Mod`.
    pub const fn is_modifier(self) -> bool {
        matches!(self, Self::Shift | Self::Alt | Self::Mod)
    }

    /// True for the four arrow keys.
    pub const fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }

    /// Canonical spelling of this token (e.g. `"A"`, `"F2"`, `"ArrowUp"`).
    pub fn to_spec(self) -> String {
        self.to_string()
    }

    /// Ordering used inside a combo for non-modifier tokens: alphabetical,
    /// ASCII case-insensitive, with exact spelling as the tie breaker.
    pub(crate) fn canonical_cmp(self, other: Self) -> Ordering {
        let a = self.to_spec();
        let b = other.to_spec();
        a.to_ascii_lowercase()
            .cmp(&b.to_ascii_lowercase())
            .then_with(|| a.cmp(&b))
    }
}

/// Uppercase `c` when that produces exactly one character.
fn uppercase(c: char) -> char {
    let mut up = c.to_uppercase();
    match (up.next(), up.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::F(n) => write!(f, "F{n}"),
            named => f.write_str(named.named().unwrap_or_default()),
        }
    }
}

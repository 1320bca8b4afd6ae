use std::{collections::BTreeSet, convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Key, Modifier, Platform};

/// A normalized key combination: a set of modifiers plus zero or more
/// non-modifier tokens.
///
/// The canonical string form lists modifiers first (`Mod`, `Alt`, `Shift`)
/// and then the remaining tokens alphabetically, joined with `+`. The combo
/// `{Shift, Plus}` is spelled `"+"`. The empty combo is "unbound" and never
/// matches an event.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Combo {
    /// Modifiers, kept in canonical order by the set.
    modifiers: BTreeSet<Modifier>,
    /// Non-modifier tokens, sorted and deduplicated.
    keys: Vec<Key>,
}

impl Combo {
    /// The empty, unbound combo as a constant.
    pub const EMPTY: Self = Self {
        modifiers: BTreeSet::new(),
        keys: Vec::new(),
    };

    /// Build a combo from modifiers and tokens, normalizing order.
    ///
    /// Modifier keys found in `keys` are moved into the modifier set.
    pub fn new(
        modifiers: impl IntoIterator<Item = Modifier>,
        keys: impl IntoIterator<Item = Key>,
    ) -> Self {
        let mut mods: BTreeSet<Modifier> = modifiers.into_iter().collect();
        let mut rest = Vec::new();
        for k in keys {
            match Modifier::try_from(k) {
                Ok(m) => {
                    mods.insert(m);
                }
                Err(()) => rest.push(k),
            }
        }
        rest.sort_by(|a, b| a.canonical_cmp(*b));
        rest.dedup();
        Self {
            modifiers: mods,
            keys: rest,
        }
    }

    /// The empty, unbound combo.
    pub const fn unbound() -> Self {
        Self::EMPTY
    }

    /// A combo consisting of one modifier and nothing else.
    pub fn solo(m: Modifier) -> Self {
        Self::new([m], [])
    }

    /// Parses an arbitrary combo string. Never fails.
    ///
    /// - Components are split on `+` and trimmed; empty ones are skipped.
    /// - Each component goes through `Key::from_spec`; unknown ones are dropped.
    /// - The literal `"+"` parses to `{Shift, Plus}`.
    ///
    /// An empty or entirely unrecognized input yields the unbound combo.
    pub fn parse(s: &str) -> Self {
        let raw = s.trim();
        if raw == "+" {
            return Self::new([Modifier::Shift], [Key::Plus]);
        }
        Self::new([], raw.split('+').filter_map(Key::from_spec))
    }

    /// Modifiers in canonical order.
    pub fn modifiers(&self) -> &BTreeSet<Modifier> {
        &self.modifiers
    }

    /// Non-modifier tokens in canonical order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// True for the unbound combo.
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty() && self.keys.is_empty()
    }

    /// True when the combo contains the `Click` token.
    pub fn has_click(&self) -> bool {
        self.keys.contains(&Key::Click)
    }

    /// The modifier, when this combo is exactly one modifier alone.
    pub fn solo_modifier(&self) -> Option<Modifier> {
        if !self.keys.is_empty() || self.modifiers.len() != 1 {
            return None;
        }
        self.modifiers.iter().next().copied()
    }

    /// True for `{Shift, Plus}`, which is spelled `"+"`.
    fn is_shift_plus(&self) -> bool {
        self.keys == [Key::Plus]
            && self.modifiers.len() == 1
            && self.modifiers.contains(&Modifier::Shift)
    }

    /// All tokens in canonical order, modifiers first.
    pub fn tokens(&self) -> impl Iterator<Item = Key> + '_ {
        self.modifiers
            .iter()
            .map(|&m| Key::from(m))
            .chain(self.keys.iter().copied())
    }

    /// Human-readable form for display only.
    ///
    /// `Mod` becomes "Command" or "Ctrl" and `Alt` becomes "Option" or
    /// "Alt" depending on `platform`; arrows render as ↑↓←→, `Backquote` as
    /// `ё` and `Plus` as `+`. Never parse the result back.
    pub fn pretty(&self, platform: Platform) -> String {
        if self.is_shift_plus() {
            return "+".to_string();
        }
        self.tokens()
            .map(|k| pretty_key(k, platform))
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Display label for one token.
fn pretty_key(k: Key, platform: Platform) -> String {
    match k {
        Key::Mod => platform.mod_label().to_string(),
        Key::Alt => platform.alt_label().to_string(),
        Key::Backquote => "ё".to_string(),
        Key::Plus => "+".to_string(),
        Key::ArrowUp => "↑".to_string(),
        Key::ArrowDown => "↓".to_string(),
        Key::ArrowLeft => "←".to_string(),
        Key::ArrowRight => "→".to_string(),
        other => other.to_spec(),
    }
}

/// Normalize an arbitrary combo string to its canonical spelling.
///
/// Idempotent: `normalize_combo(&normalize_combo(s)) == normalize_combo(s)`.
/// Unrecognized input normalizes to the empty string.
pub fn normalize_combo(raw: &str) -> String {
    Combo::parse(raw).to_string()
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_shift_plus() {
            return f.write_str("+");
        }
        let mut first = true;
        for k in self.tokens() {
            if !first {
                f.write_str("+")?;
            }
            first = false;
            write!(f, "{k}")?;
        }
        Ok(())
    }
}

impl FromStr for Combo {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Combo {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for Combo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Combo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order() {
        assert_eq!(normalize_combo("Shift+Alt+Mod+Z"), "Mod+Alt+Shift+Z");
        assert_eq!(normalize_combo("A+Shift"), normalize_combo("Shift+A"));
        assert_eq!(normalize_combo("click+shift+cmd"), "Mod+Shift+Click");
        assert_eq!(normalize_combo("Z+ArrowUp+A"), "A+ArrowUp+Z");
    }

    #[test]
    fn aliases_collapse_to_mod() {
        for raw in ["Ctrl+Z", "Control+Z", "Cmd+Z", "meta+z", "Win+Z", "mod+z"] {
            assert_eq!(normalize_combo(raw), "Mod+Z", "{raw}");
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in [
            "shift+opt+k",
            " ctrl + alt + space ",
            "+",
            "Shift+Plus",
            "Mod+Shift+Plus",
            "yo",
            "F2",
            "ё",
            "Shift+Shift+A+a",
            "",
            "Unidentified",
        ] {
            let once = normalize_combo(raw);
            assert_eq!(normalize_combo(&once), once, "{raw}");
        }
    }

    #[test]
    fn shift_plus_is_spelled_plus() {
        assert_eq!(normalize_combo("Shift+Plus"), "+");
        assert_eq!(normalize_combo("plus+shift"), "+");
        assert_eq!(normalize_combo("+"), "+");
        assert_eq!(
            Combo::parse("+"),
            Combo::new([Modifier::Shift], [Key::Plus])
        );
        // Only the exact pair gets the shorthand.
        assert_eq!(normalize_combo("Mod+Shift+Plus"), "Mod+Shift+Plus");
        assert_eq!(normalize_combo("Plus"), "Plus");
    }

    #[test]
    fn unknown_components_are_dropped() {
        assert_eq!(normalize_combo("Mod+Bogus+Z"), "Mod+Z");
        assert_eq!(normalize_combo("Bogus"), "");
        assert!(Combo::parse("   ").is_empty());
        assert!(Combo::parse("++").is_empty());
    }

    #[test]
    fn duplicates_removed() {
        assert_eq!(normalize_combo("a+A+shift+SHIFT"), "Shift+A");
    }

    #[test]
    fn solo_modifier_detection() {
        assert_eq!(Combo::parse("Shift").solo_modifier(), Some(Modifier::Shift));
        assert_eq!(Combo::solo(Modifier::Alt).to_string(), "Alt");
        assert_eq!(Combo::parse("Shift+A").solo_modifier(), None);
        assert_eq!(Combo::parse("Mod+Alt").solo_modifier(), None);
        assert_eq!(Combo::parse("").solo_modifier(), None);
    }

    #[test]
    fn pretty_printing() {
        let c = Combo::parse("Mod+Alt+Shift+ArrowUp");
        assert_eq!(c.pretty(Platform::Apple), "Command+Option+Shift+↑");
        assert_eq!(c.pretty(Platform::Other), "Ctrl+Alt+Shift+↑");
        assert_eq!(Combo::parse("Backquote").pretty(Platform::Other), "ё");
        assert_eq!(Combo::parse("+").pretty(Platform::Apple), "+");
        assert_eq!(Combo::parse("").pretty(Platform::Apple), "");
    }

    #[test]
    fn serde_as_string() {
        let c = Combo::parse("shift+cmd+z");
        let s = ron::to_string(&c).expect("serialize");
        assert_eq!(s, "\"Mod+Shift+Z\"");
        let back: Combo = ron::from_str("\"control+shift+z\"").expect("deserialize");
        assert_eq!(back, c);
    }
}

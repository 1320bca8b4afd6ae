use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Engine operating mode.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotkeyMode {
    /// Bindings are live and dispatch tree commands.
    #[default]
    Builtin,
    /// Bindings are being edited; tree dispatch is suspended.
    Custom,
}

impl HotkeyMode {
    /// Lowercase mode name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Custom => "custom",
        }
    }

    /// True when tree commands must not be dispatched.
    pub const fn suspends_dispatch(self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for HotkeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HotkeyMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!("Custom".parse::<HotkeyMode>(), Ok(HotkeyMode::Custom));
        assert_eq!(HotkeyMode::Builtin.to_string(), "builtin");
        assert!("manual".parse::<HotkeyMode>().is_err());
        assert!(HotkeyMode::Custom.suspends_dispatch());
        assert!(!HotkeyMode::default().suspends_dispatch());
    }
}

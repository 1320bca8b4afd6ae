use serde::{Deserialize, Serialize};

use crate::ModifierFlags;

/// Host platform family. Decides display labels and which event flag is
/// the primary modifier; matching treats Ctrl and Meta alike on both.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS and iOS: the primary modifier is Command.
    Apple,
    /// Windows, Linux and everything else: the primary modifier is Ctrl.
    #[default]
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Self::Apple
        } else {
            Self::Other
        }
    }

    /// Detect the platform from a browser-style user agent or platform string.
    pub fn from_user_agent(ua: &str) -> Self {
        const APPLE: [&str; 4] = ["Mac", "iPhone", "iPad", "iPod"];
        if APPLE.iter().any(|needle| ua.contains(needle)) {
            Self::Apple
        } else {
            Self::Other
        }
    }

    /// Display label for `Mod`.
    pub const fn mod_label(self) -> &'static str {
        match self {
            Self::Apple => "Command",
            Self::Other => "Ctrl",
        }
    }

    /// Display label for `Alt`.
    pub const fn alt_label(self) -> &'static str {
        match self {
            Self::Apple => "Option",
            Self::Other => "Alt",
        }
    }

    /// Event flags a user would produce by holding the primary modifier.
    pub const fn primary_flags(self) -> ModifierFlags {
        match self {
            Self::Apple => ModifierFlags::NONE.with_meta(),
            Self::Other => ModifierFlags::NONE.with_ctrl(),
        }
    }
}

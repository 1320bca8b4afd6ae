use std::fmt;

use keybinds::Action;
use keytoken::Combo;

/// What the engine did with one input event.
///
/// The host calls `preventDefault`/`stopPropagation` exactly when
/// `prevents_default` is true.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not handled; let the event through untouched.
    Pass,
    /// Tracking state changed, nothing fired.
    Tracked,
    /// A bound action was resolved and dispatched.
    Dispatched(Action),
    /// A binding capture committed a new combo.
    Captured {
        /// Action that was rebound.
        action: Action,
        /// Normalized combo now bound to it.
        combo: Combo,
    },
    /// A binding capture was abandoned.
    CaptureCancelled,
    /// Consumed by an active capture without effect.
    Swallowed,
}

impl Outcome {
    /// True when the host must suppress the event's default handling.
    pub const fn prevents_default(&self) -> bool {
        matches!(
            self,
            Self::Dispatched(_) | Self::Captured { .. } | Self::CaptureCancelled | Self::Swallowed
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("pass"),
            Self::Tracked => f.write_str("tracked"),
            Self::Dispatched(a) => write!(f, "dispatch {a}"),
            Self::Captured { action, combo } => write!(f, "captured {action} = {combo}"),
            Self::CaptureCancelled => f.write_str("capture cancelled"),
            Self::Swallowed => f.write_str("swallowed"),
        }
    }
}

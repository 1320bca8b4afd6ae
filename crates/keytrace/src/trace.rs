//! Recorded input traces.
//!
//! A trace is a RON list of steps:
//!
//! ```ron
//! [
//!     focus_on(row("n1")),
//!     down("ArrowDown", "ArrowDown", ""),
//!     wait(600),
//!     up("ArrowDown", "ArrowDown", ""),
//!     click(Some("n7"), "shift"),
//! ]
//! ```
//!
//! Modifier strings use [`ModifierFlags::parse`] syntax (`"ctrl+shift"`, `""`).

use std::{fmt, fs, path::Path, time::Duration};

use hotkey_engine::{Action, FocusTarget, HotkeyMode};
use keytoken::{InputEvent, KeyEvent, ModifierFlags, PointerEvent, Visibility};
use serde::Deserialize;

use crate::{Error, Result};

/// What had focus, as written in a trace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusSpec {
    /// Nothing focused.
    None,
    /// An outline row with the given id.
    Row(String),
    /// A single-line input.
    Input,
    /// A `<textarea>`.
    TextArea,
    /// A contenteditable element.
    ContentEditable,
    /// A code editor surface.
    Editor,
    /// Any other element.
    Other,
}

impl From<FocusSpec> for FocusTarget {
    fn from(spec: FocusSpec) -> Self {
        match spec {
            FocusSpec::None => Self::None,
            FocusSpec::Row(id) => Self::Row(id),
            FocusSpec::Input => Self::TextInput,
            FocusSpec::TextArea => Self::TextArea,
            FocusSpec::ContentEditable => Self::ContentEditable,
            FocusSpec::Editor => Self::Editor,
            FocusSpec::Other => Self::Other,
        }
    }
}

/// One step of a trace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStep {
    /// Keydown: `(code, key, modifiers)`.
    Down(String, String, String),
    /// Keyup: `(code, key, modifiers)`.
    Up(String, String, String),
    /// OS auto-repeat keydown: `(code, key, modifiers)`.
    Repeat(String, String, String),
    /// Primary-button pointer down: `(row target, modifiers)`.
    Click(Option<String>, String),
    /// Window blur.
    Blur,
    /// Window focus.
    Focus,
    /// Document became hidden.
    Hidden,
    /// Document became visible.
    Visible,
    /// Move focus to a target.
    FocusOn(FocusSpec),
    /// Change the selected row.
    Select(Option<String>),
    /// Switch hotkey mode.
    Mode(HotkeyMode),
    /// Start capturing a binding for an action.
    Capture(Action),
    /// Let time pass, in milliseconds.
    Wait(u64),
}

impl TraceStep {
    /// The engine event this step produces, if it is an input event.
    pub fn to_event(&self) -> Result<Option<InputEvent>> {
        let key = |ev: KeyEvent, mods: &str| -> Result<InputEvent> {
            Ok(InputEvent::Key(ev.with_modifiers(parse_mods(mods)?)))
        };
        let ev = match self {
            Self::Down(code, k, mods) => key(KeyEvent::down(code, k), mods)?,
            Self::Up(code, k, mods) => key(KeyEvent::up(code, k), mods)?,
            Self::Repeat(code, k, mods) => key(KeyEvent::down(code, k).repeating(), mods)?,
            Self::Click(target, mods) => {
                InputEvent::Pointer(PointerEvent::new(target.as_deref(), parse_mods(mods)?))
            }
            Self::Blur => InputEvent::Blur,
            Self::Focus => InputEvent::Focus,
            Self::Hidden => InputEvent::Visibility(Visibility::Hidden),
            Self::Visible => InputEvent::Visibility(Visibility::Visible),
            Self::FocusOn(_)
            | Self::Select(_)
            | Self::Mode(_)
            | Self::Capture(_)
            | Self::Wait(_) => return Ok(None),
        };
        Ok(Some(ev))
    }

    /// Time to wait for a `wait` step.
    pub fn delay(&self) -> Option<Duration> {
        match self {
            Self::Wait(ms) => Some(Duration::from_millis(*ms)),
            _ => None,
        }
    }
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let with_mods = |f: &mut fmt::Formatter<'_>, name: &str, key: &str, mods: &str| {
            if mods.is_empty() {
                write!(f, "{name} {key}")
            } else {
                write!(f, "{name} {mods}+{key}")
            }
        };
        match self {
            Self::Down(_, key, mods) => with_mods(f, "down", key, mods),
            Self::Up(_, key, mods) => with_mods(f, "up", key, mods),
            Self::Repeat(_, key, mods) => with_mods(f, "repeat", key, mods),
            Self::Click(target, mods) => {
                with_mods(f, "click", target.as_deref().unwrap_or("-"), mods)
            }
            Self::Blur => f.write_str("blur"),
            Self::Focus => f.write_str("focus"),
            Self::Hidden => f.write_str("hidden"),
            Self::Visible => f.write_str("visible"),
            Self::FocusOn(spec) => write!(f, "focus_on {spec:?}"),
            Self::Select(id) => write!(f, "select {}", id.as_deref().unwrap_or("-")),
            Self::Mode(mode) => write!(f, "mode {mode}"),
            Self::Capture(action) => write!(f, "capture {action}"),
            Self::Wait(ms) => write!(f, "wait {ms}ms"),
        }
    }
}

/// Parse modifier flags, mapping the error into a trace error.
fn parse_mods(s: &str) -> Result<ModifierFlags> {
    ModifierFlags::parse(s).map_err(|word| Error::Trace {
        path: Default::default(),
        message: format!("unknown modifier '{word}' in \"{s}\""),
    })
}

/// Parse a trace from RON text.
pub fn parse(source: &str) -> Result<Vec<TraceStep>> {
    let steps: Vec<TraceStep> = ron::from_str(source).map_err(|e| Error::Trace {
        path: Default::default(),
        message: e.to_string(),
    })?;
    for step in &steps {
        step.to_event()?;
    }
    Ok(steps)
}

/// Read and parse a trace file.
pub fn load(path: &Path) -> Result<Vec<TraceStep>> {
    let source = fs::read_to_string(path).map_err(|e| Error::Trace {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse(&source).map_err(|e| match e {
        Error::Trace { message, .. } => Error::Trace {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

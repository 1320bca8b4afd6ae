//! Gates that suspend chord tracking.
//!
//! Tracking is suspended while focus sits in a text-editing control, and
//! while any injected `EditModeGuard` reports itself active. The engine owns
//! one `ModalLock` for exclusive editing sessions such as renaming a row.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tracing::debug;

/// What currently holds keyboard focus, as reported by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusTarget {
    /// Nothing focused (document body).
    #[default]
    None,
    /// A tree row, by id.
    Row(String),
    /// `<input>`.
    TextInput,
    /// `<textarea>`.
    TextArea,
    /// An element with `contenteditable`.
    ContentEditable,
    /// An element explicitly marked as an editor.
    Editor,
    /// Any other focusable element.
    Other,
}

impl FocusTarget {
    /// True for every kind of text-editing control.
    pub const fn is_text_editing(&self) -> bool {
        matches!(
            self,
            Self::TextInput | Self::TextArea | Self::ContentEditable | Self::Editor
        )
    }

    /// The focused row id, if a row has focus.
    pub fn row_id(&self) -> Option<&str> {
        match self {
            Self::Row(id) => Some(id),
            _ => None,
        }
    }
}

/// A capability that can suspend chord tracking.
pub trait EditModeGuard {
    /// True while tracking must be suspended.
    fn is_active(&self) -> bool;
}

/// Counting lock held for the duration of an exclusive editing session.
///
/// Clones share the same count. The lock is engaged while at least one
/// `ModalSession` is alive.
#[derive(Clone, Debug, Default)]
pub struct ModalLock {
    /// Number of live sessions.
    sessions: Arc<AtomicUsize>,
}

impl ModalLock {
    /// Create an unlocked lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session; the lock stays engaged until the session is dropped.
    pub fn begin(&self) -> ModalSession {
        let prev = self.sessions.fetch_add(1, Ordering::SeqCst);
        debug!(depth = prev + 1, "modal session begin");
        ModalSession {
            sessions: Arc::clone(&self.sessions),
        }
    }

    /// True while any session is alive.
    pub fn is_locked(&self) -> bool {
        self.sessions.load(Ordering::SeqCst) > 0
    }
}

impl EditModeGuard for ModalLock {
    fn is_active(&self) -> bool {
        self.is_locked()
    }
}

/// RAII handle for one modal session.
#[derive(Debug)]
#[must_use = "the modal lock is released as soon as the session is dropped"]
pub struct ModalSession {
    /// Shared count of the owning lock.
    sessions: Arc<AtomicUsize>,
}

impl Drop for ModalSession {
    fn drop(&mut self) {
        let prev = self.sessions.fetch_sub(1, Ordering::SeqCst);
        debug!(depth = prev.saturating_sub(1), "modal session end");
    }
}

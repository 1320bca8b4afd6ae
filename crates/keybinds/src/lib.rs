//! keybinds: The action table behind the hotkey engine.
//!
//! - `Action`: the bindable tree commands, declared in resolution priority.
//! - `BindingTable`: action → normalized combo, seeded from the defaults.
//! - `find_conflicts` / `conflict_groups`: actions sharing a combo.
//! - `resolve`: deterministic combo → action lookup.
//! - `EngineConfig`: read-only RON configuration (mode, platform, timings,
//!   binding overrides).

mod action;
pub use action::Action;

mod defaults;
pub use defaults::{DEFAULT_BINDINGS, default_combo};

mod table;
pub use table::BindingTable;

mod conflicts;
pub use conflicts::{conflict_groups, find_conflicts};

mod resolver;
pub use resolver::resolve;

mod mode;
pub use mode::HotkeyMode;

pub mod config;
pub use config::{EngineConfig, HoldRepeatConfig};

mod error;
pub use error::{Error, Result};

pub use keytoken::normalize_combo;

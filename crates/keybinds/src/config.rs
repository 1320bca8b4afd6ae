//! Read-only engine configuration in RON.
//!
//! ```ron
//! (
//!     mode: builtin,
//!     platform: Some(apple),
//!     hold_repeat: (initial_delay_ms: 450, interval_ms: 60),
//!     bindings: { "rename": "F2", "delete": "Delete" },
//! )
//! ```
//!
//! Every field is optional. Bindings are applied on top of the defaults and
//! normalized on the way in. Nothing is ever written back.

use std::{collections::BTreeMap, fs, path::Path, time::Duration};

use keytoken::Platform;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Action, BindingTable, Error, HotkeyMode, Result};

/// Clamp bounds for hold-repeat timings.
pub const HOLD_MIN_INITIAL_DELAY_MS: u64 = 50;
/// Upper bound for the initial hold delay.
pub const HOLD_MAX_INITIAL_DELAY_MS: u64 = 2000;
/// Lower bound for the repeat interval.
pub const HOLD_MIN_INTERVAL_MS: u64 = 16;
/// Upper bound for the repeat interval.
pub const HOLD_MAX_INTERVAL_MS: u64 = 1000;

/// Default delay before a held arrow starts repeating.
pub const HOLD_DEFAULT_INITIAL_DELAY_MS: u64 = 450;
/// Default interval between repeats.
pub const HOLD_DEFAULT_INTERVAL_MS: u64 = 60;

/// Timings for repeating navigation while an arrow chord is held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoldRepeatConfig {
    /// Turn hold-repeat on or off.
    pub enabled: bool,
    /// Delay before the first repeat (milliseconds).
    pub initial_delay_ms: u64,
    /// Interval between repeats (milliseconds).
    pub interval_ms: u64,
}

impl Default for HoldRepeatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_delay_ms: HOLD_DEFAULT_INITIAL_DELAY_MS,
            interval_ms: HOLD_DEFAULT_INTERVAL_MS,
        }
    }
}

impl HoldRepeatConfig {
    /// Initial delay, clamped to the supported range.
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(
            self.initial_delay_ms
                .clamp(HOLD_MIN_INITIAL_DELAY_MS, HOLD_MAX_INITIAL_DELAY_MS),
        )
    }

    /// Repeat interval, clamped to the supported range.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(
            self.interval_ms
                .clamp(HOLD_MIN_INTERVAL_MS, HOLD_MAX_INTERVAL_MS),
        )
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Starting mode.
    pub mode: HotkeyMode,
    /// Platform override; `None` means the compile target.
    pub platform: Option<Platform>,
    /// Hold-repeat timings.
    pub hold_repeat: HoldRepeatConfig,
    /// Action name → combo string overrides.
    pub bindings: BTreeMap<String, String>,
}

impl EngineConfig {
    /// Parse a configuration from RON source and validate action names.
    pub fn from_ron(source: &str) -> Result<Self> {
        let cfg: Self = ron::from_str(source).map_err(|e| Error::Parse {
            path: None,
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::Read {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        let cfg = Self::from_ron(&source).map_err(|e| e.with_path(path))?;
        debug!(path = %path.display(), bindings = cfg.bindings.len(), "config loaded");
        Ok(cfg)
    }

    /// Check that every binding names a known action.
    pub fn validate(&self) -> Result<()> {
        self.overrides().map(|_| ())
    }

    /// The binding overrides as typed actions.
    fn overrides(&self) -> Result<Vec<(Action, &str)>> {
        self.bindings
            .iter()
            .map(|(name, combo)| Ok((name.parse::<Action>()?, combo.as_str())))
            .collect()
    }

    /// Platform to use: the configured one, else the compile target.
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    /// Defaults with this configuration's overrides applied.
    pub fn binding_table(&self) -> Result<BindingTable> {
        let mut table = BindingTable::with_defaults();
        for (action, raw) in self.overrides()? {
            table.set(action, raw);
        }
        Ok(table)
    }
}

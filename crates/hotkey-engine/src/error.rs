use std::result::Result as StdResult;

use keybinds::HotkeyMode;
use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the hotkey engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding capture was requested while bindings are not editable.
    #[error("binding capture requires custom mode (current mode: {mode})")]
    NotCustomMode {
        /// Mode the engine was in.
        mode: HotkeyMode,
    },

    /// Errors from loading or validating configuration.
    #[error("configuration error: {0}")]
    Config(#[from] keybinds::Error),
}

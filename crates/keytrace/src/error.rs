//! Error handling for the keytrace crate.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for keytrace operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running keytrace.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration loading or validation errors.
    #[error("{}", .0.pretty())]
    Config(#[from] keybinds::Error),
    /// Errors surfaced by the engine.
    #[error("Engine error: {0}")]
    Engine(#[from] hotkey_engine::Error),
    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A trace file could not be read or parsed.
    #[error("Trace error in {}: {message}", path.display())]
    Trace {
        /// Trace file path.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

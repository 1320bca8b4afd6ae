//! Command-line interface definitions for keytrace.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use keytoken::Platform;
use logging::LogArgs;

/// Command-line interface for the `keytrace` binary.
#[derive(Parser, Debug)]
#[command(
    name = "keytrace",
    about = "Inspect hotkey bindings and replay input traces",
    version
)]
pub struct Cli {
    /// Logging controls shared across workspace binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Engine configuration file (RON). Defaults apply when omitted.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical spelling of combo strings.
    Normalize(NormalizeArgs),
    /// List the active bindings and any conflicts.
    Bindings(BindingsArgs),
    /// Feed a recorded event trace through the engine.
    Replay(ReplayArgs),
}

/// Arguments for the `normalize` subcommand.
#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Combo strings, e.g. `"ctrl+shift+z"` or `"Yo"`.
    #[arg(value_name = "COMBO", num_args = 1..)]
    pub combos: Vec<String>,

    /// Also show the display form for this platform (apple|other).
    #[arg(long, value_parser = parse_platform, value_name = "PLATFORM")]
    pub pretty: Option<Platform>,
}

/// Arguments for the `bindings` subcommand.
#[derive(Args, Debug, Clone)]
pub struct BindingsArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `replay` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Trace file (RON list of steps).
    #[arg(value_name = "TRACE")]
    pub trace: PathBuf,
}

/// Parse a platform name.
fn parse_platform(s: &str) -> Result<Platform, String> {
    match s.to_ascii_lowercase().as_str() {
        "apple" | "mac" | "macos" => Ok(Platform::Apple),
        "other" | "pc" | "windows" | "linux" => Ok(Platform::Other),
        other => Err(format!("unknown platform '{other}' (expected apple|other)")),
    }
}

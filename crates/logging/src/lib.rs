#![warn(missing_docs)]

//! Shared logging helpers, CLI argument definitions, and tracing utilities for the hotkey workspace.
//!
//! This crate consolidates logging infrastructure:
//! - [`fmt`]: Render tracing events to logfmt strings, and a layer that prints them
//! - CLI argument parsing for log level configuration
//! - [`init`]: install a subscriber from parsed arguments

use std::{env, io};

use clap::Args;
use tracing_subscriber::{EnvFilter, fmt::layer as fmt_layer, prelude::*, registry};

pub mod fmt;

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "hotkey_engine=trace,keybinds=debug"
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Print log lines in logfmt (`level=.. target=.. msg=..`) instead of the default format
    #[arg(long)]
    pub logfmt: bool,
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        // Core crates
        "keytoken",
        "keybinds",
        "hotkey_engine",
        // Tools
        "keytrace",
        "logging",
    ]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info"))
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install a global subscriber writing to stderr and return the filter spec used.
///
/// A subscriber that is already installed is left in place.
pub fn init(args: &LogArgs) -> String {
    let spec = compute_spec(
        args.trace,
        args.debug,
        args.log_level.as_deref(),
        args.log_filter.as_deref(),
    );
    let env_filter = env_filter_from_spec(&spec);
    let installed = if args.logfmt {
        registry()
            .with(env_filter)
            .with(fmt::LogfmtLayer::stderr())
            .try_init()
    } else {
        registry()
            .with(env_filter)
            .with(fmt_layer().without_time().with_writer(io::stderr))
            .try_init()
    };
    installed.ok();
    spec
}

//! keytrace: inspect hotkey bindings and replay recorded input traces.

mod cli;
mod error;
mod replay;
mod trace;

use std::{collections::BTreeMap, path::Path, process};

use clap::Parser;
use hotkey_engine::HotkeyEngine;
use keybinds::EngineConfig;
use keytoken::Combo;
use serde_json::json;
use tokio::runtime::Builder;
use tracing::{debug, error, info};

use crate::{
    cli::{BindingsArgs, Cli, Commands, NormalizeArgs, ReplayArgs},
    error::{Error, Result},
};

/// Load the engine configuration, or defaults when no path was given.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading config");
            Ok(EngineConfig::load_from_path(p)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Print canonical (and optionally pretty) forms of each combo.
fn normalize(args: &NormalizeArgs) {
    for raw in &args.combos {
        let combo = Combo::parse(raw);
        let canonical = if combo.is_empty() {
            "(unbound)".to_string()
        } else {
            combo.to_string()
        };
        match args.pretty {
            Some(platform) => println!("{raw:<24} {canonical:<28} {}", combo.pretty(platform)),
            None => println!("{raw:<24} {canonical}"),
        }
    }
}

/// Print the binding table and its conflicts.
fn bindings(config: &EngineConfig, args: &BindingsArgs) -> Result<()> {
    let engine = HotkeyEngine::from_config(config)?;
    let table = engine.bindings();
    let conflicts = engine.find_conflicts();
    let groups = engine.conflict_groups();

    if args.json {
        let conflict_list: Vec<_> = groups
            .iter()
            .map(|(combo, actions)| {
                json!({
                    "combo": combo.to_string(),
                    "actions": actions.iter().map(|a| a.name()).collect::<Vec<_>>(),
                })
            })
            .collect();
        let out = json!({
            "mode": engine.mode().name(),
            "platform": engine.platform(),
            "bindings": table.snapshot(),
            "conflicts": conflict_list,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("mode: {}", engine.mode());
    for (action, combo) in table.all() {
        let mark = if conflicts.contains(&action) { "  !" } else { "" };
        let shown = if combo.is_empty() {
            "(unbound)".to_string()
        } else {
            combo.to_string()
        };
        println!(
            "{:<12} {shown:<28} {}{mark}",
            action.name(),
            engine.pretty_combo(action)
        );
    }
    let by_combo: BTreeMap<String, String> = groups
        .iter()
        .map(|(combo, actions)| {
            let names: Vec<_> = actions.iter().map(|a| a.name()).collect();
            (combo.to_string(), names.join(", "))
        })
        .collect();
    if !by_combo.is_empty() {
        println!();
        println!("conflicts:");
        for (combo, names) in by_combo {
            println!("  {combo}: {names}");
        }
    }
    Ok(())
}

/// Replay a trace file on a current-thread runtime.
fn replay_trace(config: &EngineConfig, args: &ReplayArgs) -> Result<()> {
    let steps = trace::load(&args.trace)?;
    debug!(steps = steps.len(), path = %args.trace.display(), "trace loaded");
    let rt = Builder::new_current_thread().enable_time().build()?;
    let lines = rt.block_on(async {
        // The engine must be created inside the runtime for hold repeat.
        let mut engine = HotkeyEngine::from_config(config)?;
        replay::replay(&mut engine, &steps).await
    })?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Run the selected command.
fn run() -> Result<()> {
    let cli = Cli::parse();
    let spec = logging::init(&cli.log);
    debug!(filter = %spec, "logging initialized");

    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Normalize(args) => {
            normalize(args);
            Ok(())
        }
        Commands::Bindings(args) => bindings(&config, args),
        Commands::Replay(args) => replay_trace(&config, args),
    }
}

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

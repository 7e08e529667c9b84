//! # World Clock Application Entry Point
//!
//! This binary crate wires the clock engine to the terminal: it loads the
//! configuration, applies command-line edits to the zone list, starts the engine
//! and prints every published snapshot until interrupted.
//!
//! ```text
//! world-clock [--config PATH] [--once] [--inline] [--json] [--ticks N] [--12h]
//!             [--add COUNTRY_OR_TZ]... [--remove TZ]... [--search QUERY]
//! ```

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{anyhow, Context};
use log::{info, warn};
use std::env;
use world_clock_lib::{
    config::ClockConfig,
    directory::CountryDirectory,
    engine::ClockEngine,
    renderer::{draw_ascii, render_directory, render_inline, render_json},
    Snapshot,
};

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<String>,
    once: bool,
    inline: bool,
    json: bool,
    hour12: bool,
    ticks: Option<u64>,
    search: Option<String>,
    add: Vec<String>,
    remove: Vec<String>,
}

fn parse_args<I>(args: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| anyhow!("{} expects a value", flag))
        };
        match arg.as_str() {
            "--config" => parsed.config = Some(value("--config")?),
            "--once" => parsed.once = true,
            "--inline" => parsed.inline = true,
            "--json" => parsed.json = true,
            "--12h" => parsed.hour12 = true,
            "--ticks" => {
                let raw = value("--ticks")?;
                let n = raw
                    .parse::<u64>()
                    .with_context(|| format!("--ticks expects a number, got {:?}", raw))?;
                parsed.ticks = Some(n);
            }
            "--search" => parsed.search = Some(value("--search")?),
            "--add" => parsed.add.push(value("--add")?),
            "--remove" => parsed.remove.push(value("--remove")?),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
    }

    Ok(parsed)
}

/// Apply `--add`/`--remove` edits. Rejected adds are reported and skipped.
fn apply_edits(engine: &ClockEngine, args: &Args) {
    let directory = CountryDirectory::new();

    for wanted in &args.add {
        let result = match directory.lookup(wanted) {
            Some(record) => engine.add_country(&record),
            None => engine.add_zone(wanted, None),
        };
        match result {
            Ok(true) => info!("Added {}", wanted),
            Ok(false) => info!("{} is already shown", wanted),
            Err(e) => warn!("Not adding {}: {}", wanted, e),
        }
    }

    for tz in &args.remove {
        if !engine.remove_zone(tz) {
            warn!("{} is not shown, nothing removed", tz);
        }
    }

    if args.hour12 {
        engine.set_hour12(true);
    }
}

fn emit(snapshot: &Snapshot, args: &Args) -> anyhow::Result<()> {
    if args.json {
        println!("{}", render_json(snapshot)?);
    } else if args.inline {
        match snapshot.readings.first() {
            Some(first) => println!("{}", render_inline(first)),
            None => println!("(no zones selected)"),
        }
    } else {
        draw_ascii(snapshot);
    }
    Ok(())
}

async fn run(args: Args, config: ClockConfig) -> anyhow::Result<()> {
    let engine = ClockEngine::new(&config)?;
    apply_edits(&engine, &args);

    if args.once {
        if args.inline && !args.json {
            match engine.primary_reading()? {
                Some(primary) => println!("{}", render_inline(&primary)),
                None => println!("(no zones selected)"),
            }
        } else {
            emit(&engine.snapshot()?, &args)?;
        }
        return Ok(());
    }

    let mut snapshots = engine.subscribe();
    engine.start()?;

    let mut shown = 0u64;
    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                changed?;
                let snapshot = snapshots.borrow_and_update().clone();
                emit(&snapshot, &args)?;

                shown += 1;
                if args.ticks.is_some_and(|limit| shown >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping clock");
                break;
            }
        }
    }

    engine.stop();
    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(env::args().skip(1))?;

    // Directory browsing needs neither config nor runtime
    if let Some(query) = &args.search {
        for line in render_directory(&CountryDirectory::new().search(query)) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => ClockConfig::load_from_path(path),
        None => ClockConfig::load(),
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(args, config))
}

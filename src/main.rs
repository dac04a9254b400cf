//! `confview` command line.
//!
//! Replays a script of routes and commands against an in-memory store and
//! prints every action the browser emits as one JSON object per line.
//!
//! ```text
//! confview --seed entities.json script.txt
//! echo "configs/1" | confview --seed entities.json
//! ```
//!
//! Logs go to stderr (or the configured log file), so stdout carries only
//! actions.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use confview::runtime::{parse_script, Driver};
use confview::store::MemoryStore;
use confview::ui::RecordingSurface;
use confview::{Config, Entity};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "confview",
    version,
    about = "Replay navigation scripts against the configuration browser"
)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON array of entities to seed the in-memory store with.
    #[arg(short, long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Script to replay. Read from stdin when omitted.
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!(error = %error, "replay failed");
            eprintln!("error: {error}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> confview::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    confview::observability::init_tracing(&config);

    let span = tracing::debug_span!("replay", page = %config.page_name);
    let _guard = span.entered();

    let store = match &cli.seed {
        Some(path) => {
            let entities: Vec<Entity> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            tracing::debug!(entities = entities.len(), "store seeded");
            MemoryStore::with_entities(entities)
        }
        None => MemoryStore::new(),
    };

    let source = match &cli.script {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };
    let commands = parse_script(&source)?;

    let view = confview::initialize(&config)?;
    let mut driver = Driver::new(view, store, RecordingSurface::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for command in &commands {
        driver.run_command(command)?;
        for action in driver.drain_log() {
            writeln!(out, "{}", serde_json::to_string(&action)?)?;
        }
        driver.surface_mut().take();
    }
    out.flush()?;
    Ok(())
}

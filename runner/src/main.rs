//! Headless host for the Life engine.
//!
//! Usage: `lifecell [CONFIG.json] [PATTERN.rle] [GENERATIONS]`
//!
//! Runs the simulation for the given number of generations (forever if
//! omitted) and writes telemetry to stdout as JSON lines. Pass `-` in place of
//! the config to use the defaults.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use lifecell_core::prelude::*;

fn main() -> Result<()> {
    simple_logger::init_with_level(log::Level::Info).context("Unable to initialize logger")?;
    info!("Starting lifecell v{} ...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let mut config = match args.next().filter(|arg| arg != "-") {
        Some(path) => load_config(&path)?,
        None => SimConfig::default(),
    };
    if let Some(path) = args.next() {
        config.initial = PatternSource::File {
            path: PathBuf::from(path),
        };
    }
    let generations: Option<u64> = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .context("Invalid generation count")?;
    debug!("Using config {:?}", config);

    let mut sim = Simulation::new(config).context("Unable to load initial pattern")?;
    let mut sink = JsonLinesSink::new(std::io::stdout());
    sim.flush_events(&mut sink);

    let mut total = 0_u64;
    while generations.map_or(true, |n| total < n) {
        sim.step();
        sim.flush_events(&mut sink);
        total += 1;
    }

    info!("Finished after {} generations", total);
    Ok(())
}

fn load_config(path: &str) -> Result<SimConfig> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Unable to read config {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {:?}", path))
}

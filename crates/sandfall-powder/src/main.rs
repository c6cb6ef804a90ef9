//! Sandfall Powder - headless falling-sand demo

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sandfall_core::{Grid, Materials};
use sandfall_powder::{Pacing, PowderConfig, Runner, Scenario, scenario, snapshot};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario to paint before running (see --list-scenarios)
    #[arg(long, default_value = "sandbox")]
    scenario: String,

    /// Number of ticks to simulate
    #[arg(long, default_value = "600")]
    ticks: u64,

    /// Seed for a reproducible run (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write a PNG of the final grid to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Configuration file to use instead of ./sandfall.ron
    #[arg(long)]
    config: Option<PathBuf>,

    /// Step as fast as possible instead of in real time
    #[arg(long)]
    unpaced: bool,

    /// List available scenarios
    #[arg(long)]
    list_scenarios: bool,

    /// Print the material table as RON
    #[arg(long)]
    list_materials: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_scenarios {
        scenario::list_scenarios();
        return Ok(());
    }

    if args.list_materials {
        for def in Materials::new().iter() {
            println!("{}", ron::ser::to_string_pretty(def, ron::ser::PrettyConfig::default())?);
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => PowderConfig::load_from(path)?,
        None => PowderConfig::load()?,
    };
    log::debug!("Configuration: {:?}", config);

    let scenario = Scenario::find(&args.scenario).with_context(|| {
        format!(
            "Unknown scenario '{}' (try --list-scenarios)",
            args.scenario
        )
    })?;

    let rng = match args.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    };
    let display = &config.display;
    let mut grid = Grid::from_display_size(display.width, display.height, display.pixel_size, rng)
        .context("Invalid display configuration")?;

    log::info!(
        "Starting Sandfall Powder: {}x{} grid, scenario '{}'",
        grid.width(),
        grid.height(),
        scenario.name
    );
    scenario.paint(&mut grid, &config.brush);

    let pacing = if args.unpaced {
        Pacing::Unpaced
    } else {
        Pacing::Realtime
    };
    let mut runner = Runner::new(&config.simulation, pacing);
    runner.run(&mut grid, args.ticks);

    let total = runner.total();
    log::info!(
        "Totals: moved {} reactions {} expired {} spawned {} deaths {}",
        total.cells_moved,
        total.reactions,
        total.expired,
        total.spawned,
        total.deaths
    );

    if let Some(path) = &args.snapshot {
        snapshot::save(&grid, path)?;
    }

    Ok(())
}

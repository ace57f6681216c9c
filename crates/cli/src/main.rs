//! Command line interface of the coaching plan engine.
//!
//! ```bash
//! coachplan client import alice.json
//! coachplan plan 6f1c... --save "Spring Block"
//! coachplan block export 6f1c... 92ab... --format html
//! coachplan session --goal "Strength Training" --duration 45 --equipment Dumbbells
//! ```

mod commands;
mod config;

use std::{io, path::PathBuf};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "coachplan",
    version,
    about = "Workout plan generation for coaching clients",
    long_about = "Generates weekly training plans from client profiles and an exercise catalog, \
                  stores plan blocks and exports them as CSV or HTML."
)]
pub struct Cli {
    /// Directory holding clients, profiles and blocks
    #[arg(long, global = true, env = "COACHPLAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Exercise catalog CSV file (defaults to <data dir>/exercise_db.csv)
    #[arg(long, global = true, env = "COACHPLAN_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: commands::Command,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new(cli.data_dir, cli.catalog);
    debug!(
        "data directory {}, catalog {}",
        config.data_dir.display(),
        config.catalog.display()
    );

    commands::run(cli.command, &config, &mut io::stdout().lock())
}

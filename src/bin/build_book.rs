//! Offline opening book builder

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use hermit::book::{build_tallies, BuildOptions, DEFAULT_OUTPUT, DEFAULT_PLIES, DEFAULT_ROUNDS};
use hermit::utils::{init_tracing, make_rng};

#[derive(Parser, Debug)]
#[command(name = "build_book", version, about = "Build an opening book by random sampling")]
struct Args {
    /// Number of sampling rounds
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
    rounds: usize,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Plies sampled below the empty board
    #[arg(short = 'd', long = "depth", default_value_t = DEFAULT_PLIES)]
    plies: u32,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Save the raw reward tallies instead of the reduced book
    #[arg(long)]
    tallies: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            rounds: self.rounds,
            plies: self.plies,
            output: self.output.clone(),
            seed: self.seed,
            threads: self.threads,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let options = args.build_options();

    let start = Instant::now();
    let mut rng = make_rng(options.seed);
    let store = build_tallies(&options, &mut rng)?;

    if args.tallies {
        store.save(&options.output)?;
    } else {
        store.reduce().save(&options.output)?;
    }

    info!(
        output = %options.output.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "opening book written"
    );
    Ok(())
}

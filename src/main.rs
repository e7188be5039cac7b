use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use hermit::engine::{Engine, EngineOptions};
use hermit::protocol::{handle_command, parse_command, Response};
use hermit::utils::init_tracing;

/// Line-protocol engine for knight's Isolation
#[derive(Parser, Debug)]
#[command(name = "hermit", version, about)]
struct Args {
    /// Opening book to load at startup
    #[arg(long)]
    book: Option<PathBuf>,

    /// Fixed seed for the engine's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    println!("Hermit - Isolation Engine");

    let options = EngineOptions {
        book_path: args.book,
        seed: args.seed,
        ..Default::default()
    };
    let mut engine = Engine::new(options);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;

        if let Some(cmd) = parse_command(&input) {
            match handle_command(&cmd, &mut engine, &mut stdout) {
                Ok(Response::Quit) => break,
                Ok(Response::Continue) => {}
                Err(err) => {
                    if engine.options.strict_mode {
                        return Err(err);
                    }
                    error!("{:#}", err);
                    eprintln!("{:#}", err);
                }
            }
        }
    }

    stdout.flush()?;
    Ok(())
}

use clap::Parser;
use std::io::IsTerminal;
use tracing::Level;

mod error;
mod search;
mod vault;

use search::{Coordinator, RaceConfig, Winner};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "vault_race")]
#[command(about = "vault_race - two searchers race a watchdog to crack a vault")]
#[command(version)]
struct Args {
    /// Enable verbose output (every guess is logged)
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_names(true)
        .with_ansi(std::io::stdout().is_terminal())
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let coordinator = Coordinator::new(RaceConfig::default());
    let interrupt = coordinator.interrupt_handle();
    // Ctrl-C interrupts every task; the race still joins and ends normally.
    if let Err(e) = ctrlc::set_handler(move || interrupt.interrupt_all()) {
        tracing::warn!("Ctrl-C handler unavailable, the race cannot be interrupted: {}", e);
    }

    match coordinator.run() {
        Ok(result) => {
            match result.winner() {
                Some(Winner::Searcher { task, guess }) => {
                    tracing::debug!("{} won with {} after {:?}", task, guess, result.elapsed)
                }
                Some(Winner::Watchdog) => {
                    tracing::debug!("Watchdog won after {:?}", result.elapsed)
                }
                None => tracing::debug!("No winner after {:?}", result.elapsed),
            }
        }
        Err(e) => {
            eprintln!("Error ({}): {}", e.as_label(), e);
            std::process::exit(1);
        }
    }
}

use clap::Parser;
use dh_mitm::{scenario, ExchangeConfig, RootSearchPolicy};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Demonstrate Diffie-Hellman key agreement between two parties, and a man-in-the-middle
/// attack that brute-forces both private keys.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Check each prime candidate by trial division up to its square root only. Faster than the
    /// default method, with a small chance that the chosen number is not actually prime.
    #[arg(short, long)]
    quick: bool,

    /// Seed the random generator for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Primitive-root search windows to try before giving up; 1 fails on the first empty window.
    #[arg(long, default_value_t = 8)]
    root_windows: usize,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let root_search = match args.root_windows {
        0 | 1 => RootSearchPolicy::FailFast,
        n => RootSearchPolicy::Retry { max_windows: n },
    };
    let config = ExchangeConfig {
        fast_primality: args.quick,
        root_search,
        seed: args.seed,
        ..Default::default()
    };

    let mut rng = config.rng();
    match scenario::run(&config, &mut rng) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

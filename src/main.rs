//! `avlbox` command line tool.
//!
//! Loads the point file named by the single argument, then reads `cx cy r` queries from
//! stdin and prints one count per query. Logging goes to stderr and is controlled by
//! `RUST_LOG` (default `warn`).

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Count points within a radius of each query center
#[derive(Debug, Parser)]
#[command(name = "avlbox", version, about)]
struct Cli {
    /// File of whitespace separated `x y` integer pairs
    points: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "avlbox failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> avlbox::Result<()> {
    let tree = avlbox::load_file(&cli.points)?;
    info!(points = tree.len(), height = tree.height(), "index built");

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    let answered = avlbox::run_queries(&tree, stdin, stdout)?;
    info!(answered, "done");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

//! release-pr CLI

mod cli;

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "release-pr")]
#[command(about = "Open a release pull request after a version bump lands on the release branch")]
#[command(version)]
struct Cli {
    /// Path to the push event payload
    #[arg(long, env = cli::EVENT_PATH_VAR)]
    event_path: PathBuf,

    /// Path to the repository working tree
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// `RUST_LOG` (default `info`), raised to `debug` by `--verbose`
fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if verbose {
        filter = filter.add_directive(LevelFilter::DEBUG.into());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli::run_release(&cli.path, &cli.event_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

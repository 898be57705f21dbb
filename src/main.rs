//! llm-bench - latency and tokens/second of LLM chat completion endpoints

use std::process::ExitCode;

use clap::Parser;
use llm_bench_report::colors;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, UsageError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs stay on stderr so they never interleave with tables on stdout.
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    colors::configure();

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", colors::error(&format!("Error: {:#}", e)));
            if e.downcast_ref::<UsageError>().is_some() {
                eprintln!("Use --help for usage information");
            }
            ExitCode::FAILURE
        }
    }
}

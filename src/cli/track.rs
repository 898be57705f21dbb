//! `--all --track`: the tracking loop wired to CSV output and OS signals

use std::path::PathBuf;

use anyhow::{Context, Result};
use llm_bench_core::{BenchConfig, ParallelRunner, TrackerBuilder};
use llm_bench_report::{colors, tracking_banner, tracking_stopped, CsvTracker, SummaryPrinter};
use tokio::sync::broadcast;

/// Track every configured model until Ctrl+C or SIGTERM
pub async fn run(config: &BenchConfig, runner: ParallelRunner, output: PathBuf) -> Result<()> {
    let csv = CsvTracker::create(&output)
        .with_context(|| format!("Failed to create results file {}", output.display()))?;
    let csv_path = output.display().to_string();

    let mut tracker = TrackerBuilder::new()
        .runner(runner)
        .jobs(config.jobs())
        .prompt(config.prompt.clone())
        .interval(config.interval)
        .observer(Box::new(csv))
        .observer(Box::new(SummaryPrinter::stdout()))
        .build()?;

    println!("{}", tracking_banner(config.interval, &csv_path));
    println!();

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let signals = tokio::spawn(forward_shutdown_signal(shutdown_tx));

    let stats = tracker.run(shutdown_rx).await;
    signals.abort();

    tracing::info!(
        cycles = stats.cycles,
        results = stats.results,
        failed = stats.failed(),
        observer_errors = stats.observer_errors,
        "Tracking finished"
    );

    println!();
    println!("{}", tracking_stopped(&csv_path));
    Ok(())
}

/// Send one shutdown message on the first Ctrl+C or SIGTERM.
///
/// The sender is held until then: the tracker treats a closed channel as a
/// shutdown request.
async fn forward_shutdown_signal(shutdown: broadcast::Sender<()>) {
    match wait_for_signal().await {
        Ok(()) => {
            println!();
            println!("{}", colors::warning("Stopping tracking..."));
            let _ = shutdown.send(());
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install signal handlers");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

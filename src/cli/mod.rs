//! CLI argument parsing and command dispatch

mod track;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use llm_bench_core::{BenchConfig, JobExecutor, ParallelRunner, RunnerBuilder, DEFAULT_CONFIG_FILE};
use llm_bench_report::{
    all_run_header, single_run_header, single_run_report, ResultsFormatter,
};
use llm_bench_vendors::HttpExecutor;

/// Measure latency and tokens/second of LLM chat completion endpoints
#[derive(Parser, Debug)]
#[command(name = "llm-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider name from the configuration file
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Model nickname from the configuration file
    #[arg(long, value_name = "NICKNAME")]
    pub model: Option<String>,

    /// Run benchmark on all configured models
    #[arg(long)]
    pub all: bool,

    /// Enable continuous tracking with CSV output (requires --all)
    #[arg(long)]
    pub track: bool,

    /// Print the full message returned by each LLM
    #[arg(long)]
    pub print_result: bool,

    /// Seconds between tracking cycles, overriding the configuration
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// CSV file for tracking results (default: llm_benchmark_results_<timestamp>.csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, env = "LLM_BENCH_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Invalid combination of flags
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// `--track` without `--all`
    #[error("--track requires --all")]
    TrackWithoutAll,

    /// Neither a single model nor `--all`
    #[error("Either --provider and --model, or --all is required")]
    NoTarget,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One provider/model pair with a detailed report
    Single {
        /// Provider name
        provider: String,
        /// Model nickname
        model: String,
    },
    /// One fan-out over every configured model
    All,
    /// Periodic fan-outs with CSV output
    Track,
}

impl Cli {
    /// Resolve the run mode, enforcing flag combinations
    pub fn mode(&self) -> Result<Mode, UsageError> {
        if self.track && !self.all {
            return Err(UsageError::TrackWithoutAll);
        }
        if self.all {
            return Ok(if self.track { Mode::Track } else { Mode::All });
        }
        match (&self.provider, &self.model) {
            (Some(provider), Some(model)) => Ok(Mode::Single {
                provider: provider.clone(),
                model: model.clone(),
            }),
            _ => Err(UsageError::NoTarget),
        }
    }

    /// Run the requested mode
    pub async fn run(&self) -> Result<()> {
        let mode = self.mode()?;
        let config = self.load_config()?;

        tracing::debug!(
            ?mode,
            config = %self.config.display(),
            providers = config.providers.len(),
            models = config.model_count(),
            "Configuration loaded"
        );

        let executor = HttpExecutor::new(config.request_timeout)
            .context("Failed to create HTTP client")?;

        match mode {
            Mode::Single { provider, model } => {
                self.run_single(&config, &executor, &provider, &model).await
            }
            Mode::All => {
                let runner = build_runner(&config, executor)?;
                self.run_all(&config, &runner).await;
                Ok(())
            }
            Mode::Track => {
                let runner = build_runner(&config, executor)?;
                let output = self.output.clone().unwrap_or_else(|| {
                    PathBuf::from(llm_bench_report::default_file_name(Local::now()))
                });
                track::run(&config, runner, output).await
            }
        }
    }

    fn load_config(&self) -> Result<BenchConfig> {
        let mut config = BenchConfig::load(&self.config).with_context(|| {
            format!("Failed to load configuration from {}", self.config.display())
        })?;

        if let Some(secs) = self.interval {
            config = config.with_interval(Duration::from_secs(secs));
            config.validate().context("Invalid --interval")?;
        }

        Ok(config)
    }

    async fn run_single(
        &self,
        config: &BenchConfig,
        executor: &HttpExecutor,
        provider: &str,
        model: &str,
    ) -> Result<()> {
        let job = config.job(provider, model)?;

        println!("{}", single_run_header(&job, Local::now()));
        let result = executor.execute(&job, &config.prompt).await;
        let finished = Local::now();

        if !result.success {
            anyhow::bail!("{}", result.error());
        }

        println!("{}", single_run_report(&result, finished, self.print_result));
        Ok(())
    }

    async fn run_all(&self, config: &BenchConfig, runner: &ParallelRunner) {
        println!("{}", all_run_header(Local::now()));
        println!();

        let results = runner.run(&config.jobs(), &config.prompt).await;

        let formatter = ResultsFormatter::new(self.print_result);
        println!("{}", formatter.results_table(&results));
        println!();
        println!("{}", formatter.summary(&results));
    }
}

fn build_runner(config: &BenchConfig, executor: HttpExecutor) -> Result<ParallelRunner> {
    let runner = RunnerBuilder::new()
        .executor(Arc::new(executor))
        .max_concurrency(config.max_concurrency)
        .build()?;
    Ok(runner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("llm-bench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_mode() {
        let cli = parse(&["--provider", "openai", "--model", "gpt4o", "--print-result"]);
        assert_eq!(
            cli.mode().unwrap(),
            Mode::Single {
                provider: "openai".to_string(),
                model: "gpt4o".to_string(),
            }
        );
        assert!(cli.print_result);
    }

    #[test]
    fn test_all_and_track_modes() {
        assert_eq!(parse(&["--all"]).mode().unwrap(), Mode::All);
        assert_eq!(parse(&["--all", "--track"]).mode().unwrap(), Mode::Track);
        // --all wins over a single target
        assert_eq!(
            parse(&["--all", "--provider", "openai"]).mode().unwrap(),
            Mode::All
        );
    }

    #[test]
    fn test_track_requires_all() {
        let err = parse(&["--track", "--provider", "a", "--model", "b"])
            .mode()
            .unwrap_err();
        assert_eq!(err.to_string(), "--track requires --all");
    }

    #[test]
    fn test_target_required() {
        let err = parse(&["--provider", "openai"]).mode().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Either --provider and --model, or --all is required"
        );
        assert!(matches!(parse(&[]).mode(), Err(UsageError::NoTarget)));
    }

    #[test]
    fn test_tracking_options() {
        let cli = parse(&[
            "--all",
            "--track",
            "--interval",
            "600",
            "--output",
            "out.csv",
            "--config",
            "custom.yaml",
        ]);
        assert_eq!(cli.interval, Some(600));
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.config, PathBuf::from("custom.yaml"));
    }
}

//! # retrain — scheduled ML retraining pipeline
//!
//! Validates incoming data for drift, trains two model variants in
//! parallel, selects the better one by f1, deploys when it clears the
//! score thresholds, and reports the outcome to a chat channel.
//!
//! Usage:
//!   retrain                       # run on the configured schedule
//!   retrain --once                # single run, then exit
//!   retrain --schedule "0 6 * * *"
//!   retrain --once --no-notify    # dry report to the log

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use retrain_channels::{LogNotifier, TelegramNotifier};
use retrain_core::{Notifier, RetrainConfig};
use retrain_pipeline::cron::Schedule;
use retrain_pipeline::{LogDeployer, Pipeline, RandomDrift, SimulatedTrainer, runner};

#[derive(Parser)]
#[command(name = "retrain", version, about = "🔁 Scheduled ML retraining pipeline")]
struct Cli {
    /// Config file path (default: ~/.retrain/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the pipeline once and exit
    #[arg(long)]
    once: bool,

    /// Override the configured cron-lite schedule
    #[arg(long)]
    schedule: Option<String>,

    /// Log the report instead of sending it
    #[arg(long)]
    no_notify: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => RetrainConfig::load_from(path)?,
        None => RetrainConfig::load()?,
    };
    config.apply_env();
    if let Some(schedule) = &cli.schedule {
        config.schedule = schedule.clone();
    }
    config.validate()?;

    let notifier: Arc<dyn Notifier> = match &config.telegram {
        Some(tg) if tg.enabled && !cli.no_notify => Arc::new(TelegramNotifier::new(tg.into())),
        _ => Arc::new(LogNotifier),
    };
    tracing::info!("Notifier: {}", notifier.name());

    let pipeline = Arc::new(Pipeline::new(
        config.model_version.clone(),
        config.notify_policy,
        Arc::new(RandomDrift),
        Arc::new(SimulatedTrainer),
        Arc::new(LogDeployer),
        notifier,
    ));

    if cli.once {
        let report = pipeline.run().await?;
        tracing::info!(
            "Run {} finished: {} via {}",
            report.run_id,
            report.selection.chosen.variant,
            report.selection.route
        );
        return Ok(());
    }

    let schedule = Schedule::parse(&config.schedule)?;
    runner::run_scheduled(pipeline, schedule, config.check_interval_secs).await;
    Ok(())
}

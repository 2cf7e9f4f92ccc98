use anyhow::Context;
use bosun::*;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Bosun - Docker label inventory.
#[derive(Parser)]
#[command(name = "bosun", version, about = "Inspect Docker resources by label")]
struct Cli {
    /// Config file (default: $BOSUN_CONFIG, then ./bosun.toml if present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Label operations
    #[command(subcommand)]
    Labels(LabelsCommand),
}

#[derive(Subcommand)]
enum LabelsCommand {
    /// Print the current label snapshot as JSON
    Snapshot {
        /// Include stopped containers in the snapshot
        #[arg(long)]
        stopped: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app_config = match &cli.config {
        Some(path) => config::AppConfig::load_from(path)?,
        None => config::AppConfig::load()?,
    };
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "bosun starting");

    match cli.command {
        Command::Labels(LabelsCommand::Snapshot { stopped }) => {
            run_snapshot(&app_config, stopped).await
        }
    }
}

async fn run_snapshot(
    app_config: &config::AppConfig,
    include_stopped: bool,
) -> anyhow::Result<()> {
    let docker_repo = docker_repo::DockerRepo::connect(&app_config.docker)?;
    let mut aggregator = SnapshotAggregator::new(Arc::new(docker_repo));
    if let Some(deadline) = app_config.snapshot.deadline() {
        aggregator = aggregator.with_deadline(deadline);
    }
    let selector = app_config.snapshot.selector(include_stopped);

    let cancel = CancellationToken::new();
    let signal_handle = tokio::spawn(cancel_on_signal(cancel.clone()));

    let result = aggregator.snapshot(&cancel, &selector).await;
    signal_handle.abort();
    let snapshot = match result {
        Ok(s) => s,
        Err(e @ SnapshotError::Connectivity { .. }) => {
            return Err(
                anyhow::Error::new(e).context("failed to get snapshot (is Docker running?)")
            );
        }
        Err(e) => return Err(anyhow::Error::new(e).context("failed to get snapshot")),
    };
    tracing::debug!(entities = snapshot.len(), "printing snapshot");

    // Encoded in full before anything reaches stdout.
    let mut json = serde_json::to_string_pretty(&snapshot).context("failed to encode JSON")?;
    json.push('\n');
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

async fn cancel_on_signal(cancel: CancellationToken) {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    cancel.cancel();
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
    cancel.cancel();
}

use anyhow::Result;
use clap::Parser;
use querydash::backend::{MockBackend, MockBackendBehavior};
use querydash::cli::Cli;
use querydash::config::DashboardConfig;
use querydash::App;
use std::fs::OpenOptions;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file so the terminal UI stays clean
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_max_level(log_level)
        .init();

    if cli.debug {
        tracing::info!("Debug mode enabled");
    }

    let config_path = DashboardConfig::config_file_path(cli.config_dir.as_deref())?;
    let mut config = DashboardConfig::load_from(&config_path)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let backend = MockBackend::with_behavior(MockBackendBehavior {
        latency: config.backend_latency(),
        failure_rate: config.backend.failure_rate,
        ..MockBackendBehavior::default()
    });
    tracing::info!(
        latency_ms = config.backend.latency_ms,
        failure_rate = config.backend.failure_rate,
        policy = ?config.completion_policy,
        "Starting querydash"
    );

    let mut app = App::new(config, Arc::new(backend)).with_config_path(config_path);
    app.run().await?;

    Ok(())
}

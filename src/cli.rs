use clap::Parser;
use std::path::PathBuf;

use crate::config::DashboardConfig;
use crate::submission::CompletionPolicy;
use crate::theme::ThemeMode;

/// querydash - Natural-language analytics dashboard for the terminal
#[derive(Parser, Debug)]
#[command(name = "querydash")]
#[command(about = "A terminal dashboard that charts answers to natural-language queries")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Configuration directory path
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "querydash.log")]
    pub log_file: PathBuf,

    /// Start with this theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeMode>,

    /// Only show the outcome of the most recent submission
    #[arg(long)]
    pub latest_only: bool,

    /// Simulated backend latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Probability (0.0 to 1.0) that a simulated fetch fails
    #[arg(long)]
    pub failure_rate: Option<f32>,
}

impl Cli {
    /// Overlay command-line flags onto loaded configuration
    pub fn apply_overrides(&self, config: &mut DashboardConfig) {
        if let Some(theme) = self.theme {
            config.appearance.theme = theme;
        }
        if self.latest_only {
            config.completion_policy = CompletionPolicy::LatestOnly;
        }
        if let Some(latency) = self.latency_ms {
            config.backend.latency_ms = latency;
        }
        if let Some(rate) = self.failure_rate {
            config.backend.failure_rate = rate;
        }
    }
}

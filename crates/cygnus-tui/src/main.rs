//! Live terminal dashboard for Cygnus IoT devices.

mod app;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cygnus_config::Config;
use cygnus_core::Dashboard;

use crate::app::App;

/// Watch, rename and prune discovered devices from the terminal
#[derive(Debug, Parser)]
#[command(name = "cygnus-tui", version, about)]
struct Cli {
    /// Discovery backend URL (overrides config)
    #[arg(long, short = 'u', env = "CYGNUS_BACKEND_URL")]
    backend_url: Option<String>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Poll interval in seconds (overrides config)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k')]
    insecure: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/cygnus-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Route tracing to a file; the terminal belongs to the UI.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let dir = cli
        .log_file
        .parent()
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let file = cli
        .log_file
        .file_name()
        .map_or_else(|| "cygnus-tui.log".into(), ToOwned::to_owned);

    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cygnus_tui={level},cygnus_core={level},cygnus_api={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file + environment, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => cygnus_config::load_config_from(path),
        None => cygnus_config::load_config(),
    }
    .wrap_err("failed to load configuration")?;

    if let Some(url) = &cli.backend_url {
        config.backend_url.clone_from(url);
    }
    if let Some(secs) = cli.poll_interval {
        config.dashboard.poll_interval_secs = secs;
    }
    if cli.insecure {
        config.defaults.insecure = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _guard = setup_tracing(&cli);

    let config = resolve_config(&cli)?;
    let client = config
        .client()
        .wrap_err_with(|| format!("cannot reach backend at {}", config.backend_url))?;
    let dashboard = Dashboard::new(client, config.dashboard_config()?);

    info!(backend = %config.backend_url, "starting cygnus-tui");
    App::new(dashboard).run().await
}

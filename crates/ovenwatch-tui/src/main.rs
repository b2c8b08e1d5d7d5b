//! `ovenwatch`: real-time terminal dashboard for a pizzeria order system.
//!
//! Polls the server's `/api/stats` endpoint on a fixed interval and renders
//! order counters, ingredient consumption bars and production station rows
//! with [ratatui](https://ratatui.rs). The connection dot in the status bar
//! reflects the outcome of the most recent poll.
//!
//! Logs are written to a file (default `/tmp/ovenwatch.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ovenwatch_config::ResolvedProfile;
use ovenwatch_core::{Poller, SnapshotShape, TlsVerification};

use crate::app::App;

/// Terminal dashboard for a pizzeria's order and station statistics.
#[derive(Parser, Debug)]
#[command(name = "ovenwatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Stats endpoint URL (e.g., http://localhost:10000/api/stats)
    #[arg(short = 'e', long, env = "OVENWATCH_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Poll interval (e.g., 1s, 2s, 500ms)
    #[arg(short = 'i', long, env = "OVENWATCH_INTERVAL", global = true)]
    interval: Option<String>,

    /// Expected payload shape: auto, flat or rich
    #[arg(long, env = "OVENWATCH_SHAPE", global = true)]
    shape: Option<SnapshotShape>,

    /// Config profile to use
    #[arg(short = 'p', long, env = "OVENWATCH_PROFILE", global = true)]
    profile: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, global = true)]
    insecure: bool,

    /// Log file path (defaults to /tmp/ovenwatch.log)
    #[arg(long, default_value = "/tmp/ovenwatch.log", global = true)]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the live dashboard (default)
    Watch,
    /// Poll once and print the decoded snapshot as JSON
    Fetch,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Print the effective settings after profile, env and flag resolution
    Show,
    /// Write a starter config file (refuses to overwrite)
    Init,
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr, it
/// would corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ovenwatch={log_level},ovenwatch_core={log_level},ovenwatch_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("ovenwatch.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the poller config. Priority: CLI flags > env > config file > built-in default.
fn resolve(cli: &Cli) -> Result<ResolvedProfile> {
    let cfg = ovenwatch_config::load_config().wrap_err("failed to load config")?;
    let mut resolved = ovenwatch_config::resolve_profile(&cfg, cli.profile.as_deref())?;

    let poller = &mut resolved.poller;
    if let Some(endpoint) = cli.endpoint.as_deref() {
        poller.endpoint = ovenwatch_config::parse_endpoint(endpoint)?;
    }
    if let Some(interval) = cli.interval.as_deref() {
        poller.interval = ovenwatch_config::parse_duration("interval", interval)?;
    }
    if let Some(shape) = cli.shape {
        poller.shape = shape;
    }
    if cli.insecure {
        poller.tls = TlsVerification::DangerAcceptInvalid;
    }

    Ok(resolved)
}

async fn fetch_once(resolved: ResolvedProfile) -> Result<()> {
    let poller = Poller::new(resolved.poller)?;
    let snapshot = poller
        .fetch_snapshot()
        .await
        .wrap_err_with(|| format!("poll of {} failed", poller.config().endpoint))?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_config(cli: &Cli, command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Path => {
            println!("{}", ovenwatch_config::config_path().display());
        }
        ConfigCommand::Show => {
            let resolved = resolve(cli)?;
            print!("{}", ovenwatch_config::render_effective(&resolved)?);
        }
        ConfigCommand::Init => {
            let path = ovenwatch_config::config_path();
            if path.exists() {
                color_eyre::eyre::bail!("config file already exists: {}", path.display());
            }
            ovenwatch_config::save_config_to(&ovenwatch_config::starter_config(), &path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::Config { command }) => return run_config(&cli, command),
        Some(Command::Fetch) => {
            color_eyre::install()?;
            let _log_guard = setup_tracing(&cli);
            return fetch_once(resolve(&cli)?).await;
        }
        Some(Command::Watch) | None => {}
    }

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let resolved = resolve(&cli)?;
    info!(
        profile = %resolved.name,
        endpoint = %resolved.poller.endpoint,
        interval = ?resolved.poller.interval,
        "starting ovenwatch"
    );

    let poller = Poller::new(resolved.poller)?;
    let mut app = App::new(poller);
    app.run().await?;

    Ok(())
}

//! `pumpwatch-tui` — Terminal dashboard for pump-station alert monitoring.
//!
//! Built on [ratatui](https://ratatui.rs) over the alert pipeline in
//! `pumpwatch-core`. One screen: the alert list with status tabs (1-4),
//! search (`/`), and filter/sort/area panels (`f`/`s`/`a`).
//!
//! Logs are written to a file (default `/tmp/pumpwatch-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod bridge;
mod component;
mod debounce;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

/// Terminal dashboard for monitoring pump-station alerts.
#[derive(Parser, Debug)]
#[command(name = "pumpwatch-tui", version, about)]
struct Cli {
    /// Log file path (defaults to /tmp/pumpwatch-tui.log)
    #[arg(long, default_value = "/tmp/pumpwatch-tui.log", env = "PUMPWATCH_LOG_FILE")]
    log_file: PathBuf,

    /// Search debounce window in milliseconds
    #[arg(long, default_value_t = 300, env = "PUMPWATCH_DEBOUNCE_MS")]
    debounce_ms: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pumpwatch_tui={log_level},pumpwatch_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("pumpwatch-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(debounce_ms = cli.debounce_ms, "starting pumpwatch-tui");

    let mut app = App::new(Duration::from_millis(cli.debounce_ms))?;
    app.run().await?;

    Ok(())
}

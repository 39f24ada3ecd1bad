// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rollout-daemond
//!
//! Background process that drives the update-run poll loop: periodically
//! sweeps the scheduler for updates whose deadline has passed and runs one
//! tick each, bounded to a configurable pool of concurrent ticks.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use rollout_daemon::{config::DaemonConfig, error::DaemonError, Daemon};
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("rollout-daemond {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: rollout-daemond [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = DaemonConfig::load()?;
    let log_guard = setup_logging(&config)?;

    info!(
        tick_workers = config.tick_workers,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        "starting rollout-daemond"
    );

    let daemon = Daemon::new(config.tick_workers);

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut poll = tokio::time::interval(config.poll_interval);

    loop {
        tokio::select! {
            _ = poll.tick() => {
                let ticked = daemon.sweep(std::time::Instant::now()).await;
                if ticked > 0 {
                    tracing::debug!(ticked, "poll sweep complete");
                }
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }
    }

    info!(
        update_run = daemon.metrics.update_run(),
        update_run_fail = daemon.metrics.update_run_fail(),
        "daemon stopped"
    );
    drop(log_guard);
    Ok(())
}

fn print_help() {
    println!("rollout-daemond {}", env!("CARGO_PKG_VERSION"));
    println!("Drives the rolling-update poll loop.");
    println!();
    println!("USAGE:");
    println!("    rollout-daemond");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    ROLLOUT_STATE_DIR          state/log directory");
    println!("    ROLLOUT_TICK_WORKERS       concurrent tick budget (default: 4)");
    println!("    ROLLOUT_DEFAULT_BATCH_SIZE fallback batch size for admitted updates (default: 25)");
    println!("    ROLLOUT_LOG_LEVEL          tracing EnvFilter directive (default: info)");
    println!("    ROLLOUT_POLL_INTERVAL_MS   scheduler sweep interval in ms (default: 250)");
}

fn setup_logging(
    config: &DaemonConfig,
) -> Result<tracing_appender::non_blocking::WorkerGuard, DaemonError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(DaemonError::NoStateDir)?,
        config.log_path.file_name().ok_or(DaemonError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

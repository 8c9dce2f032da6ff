use std::io;

use tracing_subscriber::EnvFilter;

mod cli;
use cli::{CliMode, USAGE, parse_cli_mode, run_export, run_service};
mod tui;
use tui::run_tui;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let result = match cli_mode {
        CliMode::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliMode::Interactive => {
            setup_file_logging();
            return run_tui().await;
        }
        CliMode::Serve(addr) => {
            setup_stderr_logging();
            run_service(addr).await
        }
        CliMode::Export(target) => {
            setup_stderr_logging();
            run_export(target).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        tracing::error!("{:#}", e);
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The terminal UI owns the screen, so interactive sessions log to a file.
fn setup_file_logging() {
    let log_dir = activity_calendar::storage::config::Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "activity-calendar.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("activity-calendar started");
}

fn setup_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

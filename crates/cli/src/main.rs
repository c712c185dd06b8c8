//! `storyboard` -- turn free-form scripts into storyboard frames.
//!
//! Parses scripts into frames, keeps the frame list in a local data
//! directory, and exports a printable HTML storyboard.
//!
//! # Environment variables
//!
//! | Variable                   | Required | Default       | Description                          |
//! |----------------------------|----------|---------------|--------------------------------------|
//! | `STORYBOARD_DATA_DIR`      | no       | `.storyboard` | Frame list and session storage       |
//! | `STORYBOARD_USERNAME`      | no       | `storyboard`  | Account allowed to log in            |
//! | `STORYBOARD_PASSWORD_HASH` | no       | --            | Argon2id hash; login disabled if unset |
//! | `STORYBOARD_SEED_ON_EMPTY` | no       | `true`        | Seed a new store with sample frames  |
//! | `STORYBOARD_LOG_FORMAT`    | no       | `text`        | `text` or `json` log lines on stderr |

use std::io::Write;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storyboard_cli::commands::{self, Cli};
use storyboard_cli::config::{CliConfig, LogFormat, DEFAULT_LOG_FILTER};

fn main() {
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(2);
    });

    init_tracing(config.log_format);

    let cli = Cli::parse();
    tracing::debug!(data_dir = %config.data_dir.display(), "Starting storyboard");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = commands::run(cli.command, &config, &mut out) {
        let _ = out.flush();
        tracing::error!(error = %format!("{e:#}"), "Command failed");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

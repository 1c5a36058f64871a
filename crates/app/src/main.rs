//! `tofula` -- Tofula storybook front end for the terminal.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default                 | Description                       |
//! |-----------------------|----------|-------------------------|-----------------------------------|
//! | `NEXT_PUBLIC_API_URL` | no       | `http://localhost:8000` | Backend base URL                  |
//! | `API_TIMEOUT_SECS`    | no       | `300`                   | Per-request timeout               |
//! | `STUDIO_PASSWORD`     | no       | `Tofula@2025`           | Studio demo password              |
//! | `TOFULA_STATE_DIR`    | no       | `.tofula`               | Directory holding `session.json`  |
//! | `RUST_LOG`            | no       | `tofula=info,...`       | Log filter                        |
//! | `LOG_FORMAT`          | no       | `text`                  | `json` for JSON log lines         |

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tofula_app::cli::Cli;
use tofula_app::commands::{self, Context};
use tofula_app::config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(LogFormat::from_env());

    let config = AppConfig::from_env();
    tracing::debug!(
        api_url = %config.client.api_url,
        state_dir = %config.state_dir.display(),
        "Starting tofula",
    );

    let ctx = match Context::from_config(&config) {
        Ok(ctx) => ctx,
        Err(e) => return report(e),
    };

    let mut stdout = std::io::stdout().lock();
    match commands::run(cli, &ctx, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e),
    }
}

fn report(error: anyhow::Error) -> ExitCode {
    tracing::debug!(error = ?error, "Command failed");
    eprintln!("Error: {error:#}");
    ExitCode::FAILURE
}

/// Logs go to stderr so rendered pages on stdout stay clean.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

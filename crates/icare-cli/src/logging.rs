//! Log subscriber setup.
//!
//! Logs go to stderr; stdout carries command output only.
//! `RUST_LOG` overrides the configured level.

use anyhow::{Result, anyhow};
use icare_core::config::{CareConfig, LogFormat};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

pub fn init(config: &CareConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            );
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true),
            );
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;
        }
    }

    tracing::debug!(format = config.log_format.as_str(), "Logging initialised");
    Ok(())
}

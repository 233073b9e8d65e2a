//! Tracing setup. The dashboard owns the terminal, so it logs to a file;
//! one-shot commands log to stderr.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "sconto_admin=info";

fn filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `<data_dir>/sconto-admin/logs`
pub fn log_dir() -> Result<PathBuf> {
  let base = dirs::data_dir().ok_or_else(|| eyre!("could not determine data directory"))?;
  Ok(base.join("sconto-admin").join("logs"))
}

/// Daily rolling file log. Keep the guard alive until exit or buffered lines
/// are lost.
pub fn init_file() -> Result<WorkerGuard> {
  let dir = log_dir()?;
  std::fs::create_dir_all(&dir).map_err(|e| eyre!("failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::daily(&dir, "sconto-admin.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::registry()
    .with(filter())
    .with(fmt::layer().with_writer(writer).with_ansi(false))
    .try_init()
    .map_err(|e| eyre!("failed to install logger: {}", e))?;

  Ok(guard)
}

pub fn init_stderr() -> Result<()> {
  tracing_subscriber::registry()
    .with(filter())
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .try_init()
    .map_err(|e| eyre!("failed to install logger: {}", e))
}

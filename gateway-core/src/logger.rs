//! Tracing setup shared by the server and the maintenance commands.
//!
//! Lines look like `2024-05-01 10:00:00  INFO whatsapp_rpc::service: Thread created thread_id=...`
//! and go to stdout and a log file, without ANSI colors.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Local wall-clock time, second precision.
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Subscriber teeing plain-text events to stdout and `log_file`.
///
/// `RUST_LOG` takes precedence over `default_directive`.
pub fn gateway_subscriber(
    log_file: &Path,
    default_directive: &str,
) -> Result<impl Subscriber + Send + Sync + 'static> {
    let file = open_log_file(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .with_context(|| format!("invalid log directive {:?}", default_directive))?,
    };

    let layer = fmt::layer()
        .with_writer(io::stdout.and(Arc::new(file)))
        .with_timer(LocalTimestamp)
        .with_target(true)
        .with_thread_ids(false)
        .with_ansi(false);

    Ok(Registry::default().with(filter).with(layer))
}

/// Installs [`gateway_subscriber`] globally at `info`. Load `.env` before calling.
pub fn init_tracing(log_file_path: &str) -> Result<()> {
    gateway_subscriber(Path::new(log_file_path), "info")?
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}

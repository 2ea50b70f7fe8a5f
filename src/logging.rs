use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    /// Log file, truncated on start
    File(&'a Path),
    Stderr,
    /// No subscriber; events are dropped
    Disabled,
}

/// Install the global `tracing` subscriber. The filter comes from `RUST_LOG`
/// and defaults to `info`.
pub fn init(sink: LogSink<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match sink {
        LogSink::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogSink::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogSink::Disabled => return Ok(()),
    };

    installed.map_err(|err| anyhow!("Failed to install log subscriber: {err}"))
}

use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

pub const DEFAULT_LOG_FILE: &str = "commit-commander.log";

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Write JSON debug records to a rolling file instead of stderr
    pub to_file: bool,
    pub log_file: Option<String>,
}

/// Installs the process-wide logger.
///
/// Without `to_file`, `env_logger` handles `log` records and `RUST_LOG`
/// picks the level. With it, records go through `tracing-subscriber` as JSON
/// into a daily rolling file.
pub fn init(options: &LogOptions) -> Result<()> {
    if !options.to_file {
        // A second init in the same process is harmless
        let _ = env_logger::try_init();
        return Ok(());
    }

    let path = Path::new(options.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE));
    let (directory, file_name) = split_log_path(path)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, file_name);
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .json()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install file logger: {e}"))?;

    log::debug!("Logging to {}", path.display());
    Ok(())
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((directory, file_name))
}

//! Logging to a file.
//!
//! The terminal is in raw mode while tabmode runs, so nothing is written to
//! stdout. The filter is chosen by priority:
//!
//! 1. **`TABMODE_LOG`** - a bare level (`debug`) applies to the tabmode
//!    crates; anything containing `=`, `:` or `,` is used as-is
//! 2. **`RUST_LOG`**
//! 3. **Default** - `warn` globally, `info` for the tabmode crates
//!
//! Default file: `<data_local_dir>/tabmode/logs/tabmode-<pid>.log`.
//! Override with `--log-file <path>`; a path without an extension is taken
//! as a directory.

use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{HostError, Result};

const CRATES: [&str; 3] = ["tabmode", "tabmode_core", "tabmode_keys"];

/// Returned from [`init`]; dropping it flushes and stops the file writer.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

pub fn init(config: LogConfig) -> Result<LogGuard> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_filter());

    Registry::default()
        .with(file_layer)
        .try_init()
        .map_err(|err| HostError::Log(err.to_string()))?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("tabmode-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = ProjectDirs::from("", "", "tabmode")
        .map(|proj| proj.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs");
    (dir, filename)
}

fn create_filter() -> EnvFilter {
    if let Ok(level) = env::var("TABMODE_LOG") {
        return expand_tabmode_log(&level);
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new(directives("info"))
}

fn expand_tabmode_log(value: &str) -> EnvFilter {
    if value.contains('=') || value.contains(':') || value.contains(',') {
        return EnvFilter::new(value);
    }
    EnvFilter::new(directives(value))
}

fn directives(level: &str) -> String {
    let mut parts = vec!["warn".to_string()];
    parts.extend(CRATES.iter().map(|name| format!("{name}={level}")));
    parts.join(",")
}
